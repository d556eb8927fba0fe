use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::comision::{
    ComisionDetallada, ComisionMecanico, EstadoComision, NuevaComision, TrabajoConComision,
};
use crate::models::quincena::Quincena;
use crate::utils::errors::AppResult;

pub struct ComisionRepository {
    pool: PgPool,
}

impl ComisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Asignaciones vigentes de un trabajo, con nombre del mecánico
    pub async fn asignaciones_de_trabajo(
        &self,
        id_trabajo: i32,
    ) -> AppResult<Vec<ComisionDetallada>> {
        let filas = sqlx::query_as::<_, ComisionDetallada>(
            r#"
            SELECT c.id, c.id_trabajo, c.id_mecanico, m.nombre AS nombre_mecanico,
                   t.descripcion AS descripcion_trabajo, c.ganancia_trabajo,
                   c.porcentaje_comision, c.monto_comision, c.fecha_calculo,
                   c.estado_comision, c.quincena, c.created_at
            FROM comisiones_mecanicos c
            JOIN mecanicos m ON m.id = c.id_mecanico
            JOIN trabajos t ON t.id = c.id_trabajo
            WHERE c.id_trabajo = $1
            ORDER BY c.id_mecanico
            "#,
        )
        .bind(id_trabajo)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    /// Comisiones visibles en una quincena: las ya estampadas con la etiqueta
    /// más las pendientes sin estampar cuya fecha de cálculo cae en el rango
    pub async fn comisiones_de_quincena(
        &self,
        quincena: &Quincena,
    ) -> AppResult<Vec<ComisionDetallada>> {
        let (inicio, fin) = quincena.rango_utc();

        let filas = sqlx::query_as::<_, ComisionDetallada>(
            r#"
            SELECT c.id, c.id_trabajo, c.id_mecanico, m.nombre AS nombre_mecanico,
                   t.descripcion AS descripcion_trabajo, c.ganancia_trabajo,
                   c.porcentaje_comision, c.monto_comision, c.fecha_calculo,
                   c.estado_comision, c.quincena, c.created_at
            FROM comisiones_mecanicos c
            JOIN mecanicos m ON m.id = c.id_mecanico
            JOIN trabajos t ON t.id = c.id_trabajo
            WHERE c.quincena = $1
               OR (c.quincena IS NULL
                   AND c.estado_comision = 'PENDIENTE'
                   AND c.fecha_calculo >= $2
                   AND c.fecha_calculo < $3)
            ORDER BY c.fecha_calculo, c.id
            "#,
        )
        .bind(quincena.to_string())
        .bind(inicio)
        .bind(fin)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    /// Igual que `comisiones_de_quincena` pero restringido a un mecánico
    pub async fn comisiones_de_mecanico_quincena(
        &self,
        id_mecanico: i32,
        quincena: &Quincena,
    ) -> AppResult<Vec<ComisionDetallada>> {
        let (inicio, fin) = quincena.rango_utc();

        let filas = sqlx::query_as::<_, ComisionDetallada>(
            r#"
            SELECT c.id, c.id_trabajo, c.id_mecanico, m.nombre AS nombre_mecanico,
                   t.descripcion AS descripcion_trabajo, c.ganancia_trabajo,
                   c.porcentaje_comision, c.monto_comision, c.fecha_calculo,
                   c.estado_comision, c.quincena, c.created_at
            FROM comisiones_mecanicos c
            JOIN mecanicos m ON m.id = c.id_mecanico
            JOIN trabajos t ON t.id = c.id_trabajo
            WHERE c.id_mecanico = $1
              AND (c.quincena = $2
                   OR (c.quincena IS NULL
                       AND c.estado_comision = 'PENDIENTE'
                       AND c.fecha_calculo >= $3
                       AND c.fecha_calculo < $4))
            ORDER BY c.fecha_calculo, c.id
            "#,
        )
        .bind(id_mecanico)
        .bind(quincena.to_string())
        .bind(inicio)
        .bind(fin)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    /// Historial de trabajos de un mecánico con su comisión en cada uno
    pub async fn trabajos_de_mecanico(
        &self,
        id_mecanico: i32,
    ) -> AppResult<Vec<TrabajoConComision>> {
        let filas = sqlx::query_as::<_, TrabajoConComision>(
            r#"
            SELECT t.id, t.fecha, t.matricula_carro, t.descripcion, t.costo,
                   t.mano_obra, COALESCE(g.total, 0) AS total_gastos,
                   c.ganancia_trabajo AS ganancia_base,
                   c.monto_comision AS comision,
                   c.porcentaje_comision, c.estado_comision, c.quincena
            FROM comisiones_mecanicos c
            JOIN trabajos t ON t.id = c.id_trabajo
            LEFT JOIN (
                SELECT id_trabajo, SUM(monto) AS total
                FROM detalles_gastos
                GROUP BY id_trabajo
            ) g ON g.id_trabajo = t.id
            WHERE c.id_mecanico = $1
            ORDER BY t.fecha DESC, t.id DESC
            "#,
        )
        .bind(id_mecanico)
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    /// Filas estampadas de la quincena, en todos los estados (reporte financiero)
    pub async fn filas_de_quincena(&self, quincena: &Quincena) -> AppResult<Vec<ComisionMecanico>> {
        let filas = sqlx::query_as::<_, ComisionMecanico>(
            "SELECT * FROM comisiones_mecanicos WHERE quincena = $1 ORDER BY id",
        )
        .bind(quincena.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(filas)
    }

    /// Conteo de trabajos, suma de ganancias y suma de comisiones de un
    /// mecánico, con filtros opcionales de mes, quincena y estado
    pub async fn estadisticas_de_mecanico(
        &self,
        id_mecanico: i32,
        mes: Option<&str>,
        quincena: Option<&str>,
        estado: Option<EstadoComision>,
    ) -> AppResult<(i64, Decimal, Decimal)> {
        let stats: (i64, Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT COUNT(id),
                   COALESCE(SUM(ganancia_trabajo), 0),
                   COALESCE(SUM(monto_comision), 0)
            FROM comisiones_mecanicos
            WHERE id_mecanico = $1
              AND ($2::varchar IS NULL OR mes_reporte = $2)
              AND ($3::varchar IS NULL OR quincena = $3)
              AND ($4::estado_comision IS NULL OR estado_comision = $4)
            "#,
        )
        .bind(id_mecanico)
        .bind(mes)
        .bind(quincena)
        .bind(estado)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    // ------------------------------------------------------------------
    // Operaciones dentro de transacción (reconciliación y liquidación)
    // ------------------------------------------------------------------

    /// Filas de comisión del trabajo, bloqueadas hasta el commit
    pub async fn por_trabajo_bloqueadas(
        tx: &mut PgConnection,
        id_trabajo: i32,
    ) -> AppResult<Vec<ComisionMecanico>> {
        let filas = sqlx::query_as::<_, ComisionMecanico>(
            "SELECT * FROM comisiones_mecanicos WHERE id_trabajo = $1 ORDER BY id_mecanico FOR UPDATE",
        )
        .bind(id_trabajo)
        .fetch_all(tx)
        .await?;

        Ok(filas)
    }

    pub async fn insertar(
        tx: &mut PgConnection,
        nueva: &NuevaComision,
        mes_reporte: &str,
    ) -> AppResult<ComisionMecanico> {
        let fila = sqlx::query_as::<_, ComisionMecanico>(
            r#"
            INSERT INTO comisiones_mecanicos
                (id_trabajo, id_mecanico, ganancia_trabajo, porcentaje_comision,
                 monto_comision, mes_reporte)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(nueva.id_trabajo)
        .bind(nueva.id_mecanico)
        .bind(nueva.ganancia_trabajo)
        .bind(nueva.porcentaje_comision)
        .bind(nueva.monto_comision)
        .bind(mes_reporte)
        .fetch_one(tx)
        .await?;

        Ok(fila)
    }

    /// Recalcula los montos de una fila pendiente. La fecha de cálculo vuelve
    /// a NOW() y el estampado de quincena se pierde hasta el próximo cierre
    pub async fn recomputar(
        tx: &mut PgConnection,
        id: i32,
        ganancia_trabajo: Decimal,
        porcentaje_comision: Decimal,
        monto_comision: Decimal,
        mes_reporte: &str,
    ) -> AppResult<ComisionMecanico> {
        let fila = sqlx::query_as::<_, ComisionMecanico>(
            r#"
            UPDATE comisiones_mecanicos
            SET ganancia_trabajo = $2, porcentaje_comision = $3, monto_comision = $4,
                mes_reporte = $5, fecha_calculo = NOW(), quincena = NULL
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ganancia_trabajo)
        .bind(porcentaje_comision)
        .bind(monto_comision)
        .bind(mes_reporte)
        .fetch_one(tx)
        .await?;

        Ok(fila)
    }

    pub async fn eliminar_por_mecanicos(
        tx: &mut PgConnection,
        id_trabajo: i32,
        ids_mecanicos: &[i32],
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM comisiones_mecanicos WHERE id_trabajo = $1 AND id_mecanico = ANY($2)",
        )
        .bind(id_trabajo)
        .bind(ids_mecanicos)
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Estampa la etiqueta sobre las filas sin quincena cuya fecha de cálculo
    /// cae en el rango. No toca el estado: una fila ya resuelta a mano
    /// conserva su resolución
    pub async fn estampar_quincena(tx: &mut PgConnection, quincena: &Quincena) -> AppResult<u64> {
        let (inicio, fin) = quincena.rango_utc();

        let result = sqlx::query(
            r#"
            UPDATE comisiones_mecanicos
            SET quincena = $1
            WHERE quincena IS NULL AND fecha_calculo >= $2 AND fecha_calculo < $3
            "#,
        )
        .bind(quincena.to_string())
        .bind(inicio)
        .bind(fin)
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Pendientes de un mecánico ya estampadas con la etiqueta, bloqueadas
    pub async fn pendientes_estampadas(
        tx: &mut PgConnection,
        id_mecanico: i32,
        quincena: &Quincena,
    ) -> AppResult<Vec<ComisionMecanico>> {
        let filas = sqlx::query_as::<_, ComisionMecanico>(
            r#"
            SELECT * FROM comisiones_mecanicos
            WHERE id_mecanico = $1 AND quincena = $2 AND estado_comision = 'PENDIENTE'
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(id_mecanico)
        .bind(quincena.to_string())
        .fetch_all(tx)
        .await?;

        Ok(filas)
    }

    /// Pendientes sin estampar cuyo trabajo cae en el rango de la quincena.
    /// Respaldo para liquidar antes de haber corrido el cierre
    pub async fn pendientes_sin_estampar_por_fecha_trabajo(
        tx: &mut PgConnection,
        id_mecanico: i32,
        quincena: &Quincena,
    ) -> AppResult<Vec<ComisionMecanico>> {
        let (inicio, fin) = quincena.rango_utc();

        let filas = sqlx::query_as::<_, ComisionMecanico>(
            r#"
            SELECT c.* FROM comisiones_mecanicos c
            JOIN trabajos t ON t.id = c.id_trabajo
            WHERE c.id_mecanico = $1
              AND c.quincena IS NULL
              AND c.estado_comision = 'PENDIENTE'
              AND t.fecha >= $2
              AND t.fecha < $3
            ORDER BY c.id
            FOR UPDATE OF c
            "#,
        )
        .bind(id_mecanico)
        .bind(inicio)
        .bind(fin)
        .fetch_all(tx)
        .await?;

        Ok(filas)
    }

    pub async fn aprobar_filas(
        tx: &mut PgConnection,
        ids: &[i32],
        quincena: &Quincena,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE comisiones_mecanicos
            SET estado_comision = 'APROBADA', quincena = $2
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .bind(quincena.to_string())
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Denegar conserva la fila como constancia pero deja el monto en cero
    pub async fn denegar_filas(
        tx: &mut PgConnection,
        ids: &[i32],
        quincena: &Quincena,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE comisiones_mecanicos
            SET estado_comision = 'DENEGADA', monto_comision = 0, quincena = $2
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .bind(quincena.to_string())
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn bloquear_por_id(
        tx: &mut PgConnection,
        id: i32,
    ) -> AppResult<Option<ComisionMecanico>> {
        let fila = sqlx::query_as::<_, ComisionMecanico>(
            "SELECT * FROM comisiones_mecanicos WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(tx)
        .await?;

        Ok(fila)
    }

    pub async fn cambiar_estado(
        tx: &mut PgConnection,
        id: i32,
        estado: EstadoComision,
        monto_comision: Option<Decimal>,
    ) -> AppResult<ComisionMecanico> {
        let fila = sqlx::query_as::<_, ComisionMecanico>(
            r#"
            UPDATE comisiones_mecanicos
            SET estado_comision = $2, monto_comision = COALESCE($3, monto_comision)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(estado)
        .bind(monto_comision)
        .fetch_one(tx)
        .await?;

        Ok(fila)
    }
}
