use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub aws_region: String,
    pub aws_bucket: String,
    pub aws_prefix: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "debug".into());
        // AWS credentials themselves resolve through the SDK default chain.
        let aws_region =
            env::var("AWS_S3_REGION_NAME").unwrap_or_else(|_| "ap-southeast-1".into());
        let aws_bucket =
            env::var("AWS_STORAGE_BUCKET_NAME").unwrap_or_else(|_| "cdn.ruangbumi.com".into());
        let aws_prefix =
            env::var("AWS_S3_PREFIX").unwrap_or_else(|_| "dhaharan.id.ruangbumi.com".into());

        Ok(Self {
            database_url,
            rust_log,
            aws_region,
            aws_bucket,
            aws_prefix,
        })
    }
}
