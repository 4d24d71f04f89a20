use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, IntoActiveModel};

use crate::entities::{
    bahan_resep, foto_kegiatan, foto_pengurus, foto_resep, kegiatan, nutrisi_resep, pengurus,
    resep, steps_resep, tips_resep, volunteer,
};

pub struct Mutation;

impl Mutation {
    /// Mark a volunteer approved. Idempotent: approving an already-approved
    /// volunteer just refreshes `updated_at`. Returns `None` when the id
    /// does not exist.
    pub async fn approve_volunteer(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<volunteer::Model>, DbErr> {
        let Some(row) = volunteer::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut active = row.into_active_model();
        active.is_approved = Set(true);
        active.updated_at = Set(Utc::now().fixed_offset());
        Ok(Some(active.update(db).await?))
    }

    /// Delete an activity together with its photo and volunteer rows.
    /// Child rows are removed explicitly so the behavior does not depend
    /// on the backend honoring cascade clauses. Returns false when the id
    /// does not exist.
    pub async fn delete_kegiatan(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
        if kegiatan::Entity::find_by_id(id).one(db).await?.is_none() {
            return Ok(false);
        }

        foto_kegiatan::Entity::delete_many()
            .filter(foto_kegiatan::Column::KegiatanId.eq(id))
            .exec(db)
            .await?;
        volunteer::Entity::delete_many()
            .filter(volunteer::Column::KegiatanId.eq(id))
            .exec(db)
            .await?;
        kegiatan::Entity::delete_by_id(id).exec(db).await?;

        Ok(true)
    }

    /// Delete a recipe and all five sub-resource row sets.
    pub async fn delete_resep(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
        if resep::Entity::find_by_id(id).one(db).await?.is_none() {
            return Ok(false);
        }

        bahan_resep::Entity::delete_many()
            .filter(bahan_resep::Column::ResepId.eq(id))
            .exec(db)
            .await?;
        steps_resep::Entity::delete_many()
            .filter(steps_resep::Column::ResepId.eq(id))
            .exec(db)
            .await?;
        tips_resep::Entity::delete_many()
            .filter(tips_resep::Column::ResepId.eq(id))
            .exec(db)
            .await?;
        nutrisi_resep::Entity::delete_many()
            .filter(nutrisi_resep::Column::ResepId.eq(id))
            .exec(db)
            .await?;
        foto_resep::Entity::delete_many()
            .filter(foto_resep::Column::ResepId.eq(id))
            .exec(db)
            .await?;
        resep::Entity::delete_by_id(id).exec(db).await?;

        Ok(true)
    }

    /// Delete a staff member and their photo rows.
    pub async fn delete_pengurus(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
        if pengurus::Entity::find_by_id(id).one(db).await?.is_none() {
            return Ok(false);
        }

        foto_pengurus::Entity::delete_many()
            .filter(foto_pengurus::Column::PengurusId.eq(id))
            .exec(db)
            .await?;
        pengurus::Entity::delete_by_id(id).exec(db).await?;

        Ok(true)
    }
}
