use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::trabajo::{
    DetalleGasto, MecanicoAsignado, NuevoGasto, Trabajo, TrabajoConTotales,
};
use crate::utils::errors::AppResult;

pub struct TrabajoRepository {
    pool: PgPool,
}

impl TrabajoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crea el trabajo junto con sus gastos en una sola transacción
    pub async fn crear(
        &self,
        matricula_carro: &str,
        descripcion: &str,
        fecha: DateTime<Utc>,
        fecha_registro: DateTime<Utc>,
        costo: Decimal,
        mano_obra: Decimal,
        markup_repuestos: Decimal,
        ganancia: Decimal,
        aplica_iva: bool,
        gastos: &[NuevoGasto],
    ) -> AppResult<Trabajo> {
        let mut tx = self.pool.begin().await?;

        let trabajo = sqlx::query_as::<_, Trabajo>(
            r#"
            INSERT INTO trabajos
                (matricula_carro, descripcion, fecha, fecha_registro, costo,
                 mano_obra, markup_repuestos, ganancia, aplica_iva)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(matricula_carro)
        .bind(descripcion)
        .bind(fecha)
        .bind(fecha_registro)
        .bind(costo)
        .bind(mano_obra)
        .bind(markup_repuestos)
        .bind(ganancia)
        .bind(aplica_iva)
        .fetch_one(&mut *tx)
        .await?;

        Self::insertar_gastos(&mut tx, trabajo.id, gastos).await?;

        tx.commit().await?;
        Ok(trabajo)
    }

    pub async fn buscar_por_id(&self, id: i32) -> AppResult<Option<Trabajo>> {
        let trabajo = sqlx::query_as::<_, Trabajo>("SELECT * FROM trabajos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trabajo)
    }

    pub async fn listar_con_totales(&self) -> AppResult<Vec<TrabajoConTotales>> {
        let trabajos = sqlx::query_as::<_, TrabajoConTotales>(
            r#"
            SELECT t.*, COALESCE(g.total, 0) AS total_gastos
            FROM trabajos t
            LEFT JOIN (
                SELECT id_trabajo, SUM(monto) AS total
                FROM detalles_gastos
                GROUP BY id_trabajo
            ) g ON g.id_trabajo = t.id
            ORDER BY t.fecha DESC, t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trabajos)
    }

    pub async fn gastos_de_trabajo(&self, id_trabajo: i32) -> AppResult<Vec<DetalleGasto>> {
        let gastos = sqlx::query_as::<_, DetalleGasto>(
            "SELECT * FROM detalles_gastos WHERE id_trabajo = $1 ORDER BY id",
        )
        .bind(id_trabajo)
        .fetch_all(&self.pool)
        .await?;

        Ok(gastos)
    }

    /// Mecánicos asignados de todos los trabajos (para el listado enriquecido)
    pub async fn mecanicos_asignados(&self) -> AppResult<Vec<MecanicoAsignado>> {
        let asignados = sqlx::query_as::<_, MecanicoAsignado>(
            r#"
            SELECT c.id_trabajo, c.id_mecanico, m.nombre
            FROM comisiones_mecanicos c
            JOIN mecanicos m ON m.id = c.id_mecanico
            ORDER BY c.id_trabajo, c.id_mecanico
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(asignados)
    }

    /// Actualiza el trabajo y reemplaza sus gastos en una sola transacción.
    /// La fecha del trabajo pasa a ser la de la última modificación
    pub async fn actualizar(
        &self,
        id: i32,
        descripcion: &str,
        costo: Decimal,
        mano_obra: Decimal,
        markup_repuestos: Decimal,
        ganancia: Decimal,
        aplica_iva: bool,
        gastos: &[NuevoGasto],
    ) -> AppResult<Trabajo> {
        let mut tx = self.pool.begin().await?;

        let trabajo = sqlx::query_as::<_, Trabajo>(
            r#"
            UPDATE trabajos
            SET descripcion = $2, costo = $3, mano_obra = $4, markup_repuestos = $5,
                ganancia = $6, aplica_iva = $7, fecha = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(descripcion)
        .bind(costo)
        .bind(mano_obra)
        .bind(markup_repuestos)
        .bind(ganancia)
        .bind(aplica_iva)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM detalles_gastos WHERE id_trabajo = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insertar_gastos(&mut tx, id, gastos).await?;

        tx.commit().await?;
        Ok(trabajo)
    }

    /// Los gastos y comisiones caen en cascada
    pub async fn eliminar(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trabajos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Bloquea el trabajo durante la reconciliación de asignaciones
    pub async fn bloquear_por_id(
        tx: &mut PgConnection,
        id: i32,
    ) -> AppResult<Option<Trabajo>> {
        let trabajo =
            sqlx::query_as::<_, Trabajo>("SELECT * FROM trabajos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(tx)
                .await?;

        Ok(trabajo)
    }

    /// Suma de gastos reales del trabajo dentro de una transacción
    pub async fn total_gastos(tx: &mut PgConnection, id_trabajo: i32) -> AppResult<Decimal> {
        let total: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(monto), 0) FROM detalles_gastos WHERE id_trabajo = $1",
        )
        .bind(id_trabajo)
        .fetch_one(tx)
        .await?;

        Ok(total.0)
    }

    async fn insertar_gastos(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id_trabajo: i32,
        gastos: &[NuevoGasto],
    ) -> AppResult<()> {
        for gasto in gastos {
            // Si no se indica monto cobrado se asume igual al gasto real
            sqlx::query(
                r#"
                INSERT INTO detalles_gastos (id_trabajo, descripcion, monto, monto_cobrado)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(id_trabajo)
            .bind(&gasto.descripcion)
            .bind(gasto.monto)
            .bind(gasto.monto_cobrado.unwrap_or(gasto.monto))
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
