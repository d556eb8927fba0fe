use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::mecanico::Mecanico;
use crate::utils::errors::AppResult;

pub struct MecanicoRepository {
    pool: PgPool,
}

impl MecanicoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn crear(
        &self,
        id_nacional: &str,
        nombre: &str,
        correo: Option<&str>,
        telefono: Option<&str>,
        porcentaje_comision: Decimal,
    ) -> AppResult<Mecanico> {
        let mecanico = sqlx::query_as::<_, Mecanico>(
            r#"
            INSERT INTO mecanicos (id_nacional, nombre, correo, telefono, porcentaje_comision)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id_nacional)
        .bind(nombre)
        .bind(correo)
        .bind(telefono)
        .bind(porcentaje_comision)
        .fetch_one(&self.pool)
        .await?;

        Ok(mecanico)
    }

    pub async fn existe_id_nacional(&self, id_nacional: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM mecanicos WHERE id_nacional = $1)")
                .bind(id_nacional)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn buscar_por_id(&self, id: i32) -> AppResult<Option<Mecanico>> {
        let mecanico = sqlx::query_as::<_, Mecanico>("SELECT * FROM mecanicos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(mecanico)
    }

    pub async fn listar(
        &self,
        activo: Option<bool>,
        skip: i64,
        limit: i64,
    ) -> AppResult<Vec<Mecanico>> {
        let mecanicos = sqlx::query_as::<_, Mecanico>(
            r#"
            SELECT * FROM mecanicos
            WHERE ($1::boolean IS NULL OR activo = $1)
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(activo)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(mecanicos)
    }

    /// Búsqueda por nombre o id nacional entre los mecánicos activos
    pub async fn buscar(&self, termino: &str, limit: i64) -> AppResult<Vec<Mecanico>> {
        let patron = format!("%{}%", termino);

        let mecanicos = sqlx::query_as::<_, Mecanico>(
            r#"
            SELECT * FROM mecanicos
            WHERE activo = TRUE AND (nombre ILIKE $1 OR id_nacional ILIKE $1)
            ORDER BY nombre
            LIMIT $2
            "#,
        )
        .bind(patron)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(mecanicos)
    }

    pub async fn listar_activos(&self) -> AppResult<Vec<Mecanico>> {
        let mecanicos =
            sqlx::query_as::<_, Mecanico>("SELECT * FROM mecanicos WHERE activo = TRUE ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(mecanicos)
    }

    pub async fn actualizar(
        &self,
        actual: Mecanico,
        nombre: Option<String>,
        correo: Option<String>,
        telefono: Option<String>,
        porcentaje_comision: Option<Decimal>,
        activo: Option<bool>,
    ) -> AppResult<Mecanico> {
        let mecanico = sqlx::query_as::<_, Mecanico>(
            r#"
            UPDATE mecanicos
            SET nombre = $2, correo = $3, telefono = $4, porcentaje_comision = $5,
                activo = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(actual.id)
        .bind(nombre.unwrap_or(actual.nombre))
        .bind(correo.or(actual.correo))
        .bind(telefono.or(actual.telefono))
        .bind(porcentaje_comision.unwrap_or(actual.porcentaje_comision))
        .bind(activo.unwrap_or(actual.activo))
        .fetch_one(&self.pool)
        .await?;

        Ok(mecanico)
    }

    pub async fn tiene_comisiones(&self, id: i32) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM comisiones_mecanicos WHERE id_mecanico = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Baja lógica: el mecánico conserva su historial de comisiones
    pub async fn desactivar(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE mecanicos SET activo = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Baja física, solo para mecánicos sin historial
    pub async fn eliminar(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM mecanicos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Carga los mecánicos de un conjunto de ids dentro de una transacción
    pub async fn buscar_por_ids(
        tx: &mut PgConnection,
        ids: &[i32],
    ) -> AppResult<Vec<Mecanico>> {
        let mecanicos =
            sqlx::query_as::<_, Mecanico>("SELECT * FROM mecanicos WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(tx)
                .await?;

        Ok(mecanicos)
    }
}
