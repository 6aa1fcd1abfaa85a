//! MySQL connection implementation

use async_trait::async_trait;
use mysql_async::{
    Conn, Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, Row as MySqlRow,
    consts::ColumnType, prelude::*,
};
use sqlprobe_core::{
    ColumnMeta, Connection, ExplainConfig, QueryResult, Result, Row, SqlProbeError, Value,
};
use std::time::Instant;

/// MySQL connection wrapper
///
/// Backed by a pool pinned to exactly one connection without session reset,
/// so every statement issued through it runs in the same session.
pub struct MySqlConnection {
    pool: Pool,
}

impl MySqlConnection {
    /// Connect to a MySQL database
    ///
    /// The connection is checked out once before returning, so bad
    /// credentials or an unreachable host fail here.
    pub async fn connect(
        host: &str,
        port: u16,
        database: Option<&str>,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        tracing::info!(host = %host, port = %port, database = ?database, "connecting to MySQL database");

        let mut opts_builder = OptsBuilder::from_opts(Opts::default())
            .ip_or_hostname(host)
            .tcp_port(port);

        if let Some(db) = database {
            opts_builder = opts_builder.db_name(Some(db));
        }
        if let Some(u) = user {
            opts_builder = opts_builder.user(Some(u));
        }
        if let Some(p) = password {
            opts_builder = opts_builder.pass(Some(p));
        }

        let constraints = PoolConstraints::new(1, 1).ok_or_else(|| {
            SqlProbeError::Connection(
                "Failed to configure MySQL pool constraints (min=1, max=1)".into(),
            )
        })?;

        let pool_opts = PoolOpts::default()
            .with_constraints(constraints)
            .with_reset_connection(false);
        opts_builder = opts_builder.pool_opts(pool_opts);

        let pool = Pool::new(Opts::from(opts_builder));

        // Verify connectivity by acquiring and releasing a connection
        let conn = pool
            .get_conn()
            .await
            .map_err(|e| SqlProbeError::Connection(format!("Failed to connect to MySQL: {}", e)))?;
        drop(conn);

        tracing::info!(host = %host, port = %port, database = ?database, "MySQL connection established");
        Ok(Self { pool })
    }

    async fn get_conn(&self) -> Result<Conn> {
        self.pool
            .get_conn()
            .await
            .map_err(|e| SqlProbeError::Connection(format!("Failed to get MySQL connection: {}", e)))
    }
}

/// Convert mysql_async Value to our Value type, using column type metadata
/// to correctly interpret byte strings from the text protocol.
pub(crate) fn mysql_value_to_value(val: mysql_async::Value, col_type: ColumnType) -> Value {
    match val {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => match col_type {
                ColumnType::MYSQL_TYPE_TINY
                | ColumnType::MYSQL_TYPE_SHORT
                | ColumnType::MYSQL_TYPE_LONG
                | ColumnType::MYSQL_TYPE_LONGLONG
                | ColumnType::MYSQL_TYPE_INT24
                | ColumnType::MYSQL_TYPE_YEAR => {
                    s.parse::<i64>().map(Value::Int64).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_FLOAT => {
                    s.parse::<f32>().map(Value::Float32).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_DOUBLE => {
                    s.parse::<f64>().map(Value::Float64).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
                    Value::Decimal(s)
                }
                _ => Value::String(s),
            },
            Err(e) => Value::Bytes(e.into_bytes()),
        },
        mysql_async::Value::Int(i) => Value::Int64(i),
        mysql_async::Value::UInt(u) => match i64::try_from(u) {
            Ok(v) => Value::Int64(v),
            Err(_) => Value::Decimal(u.to_string()),
        },
        mysql_async::Value::Float(f) => Value::Float32(f),
        mysql_async::Value::Double(d) => Value::Float64(d),
        mysql_async::Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = chrono::NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32);
            if hour == 0 && min == 0 && sec == 0 && micro == 0 {
                match date {
                    Some(date) => Value::Date(date),
                    None => Value::String(format!("{:04}-{:02}-{:02}", year, month, day)),
                }
            } else {
                match date
                    .and_then(|d| d.and_hms_micro_opt(hour as u32, min as u32, sec as u32, micro))
                {
                    Some(dt) => Value::DateTime(dt),
                    None => Value::String(format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                        year, month, day, hour, min, sec
                    )),
                }
            }
        }
        mysql_async::Value::Time(negative, days, hours, mins, secs, micros) => {
            let total_hours = days * 24 + hours as u32;
            let sign = if negative { "-" } else { "" };
            Value::String(format!(
                "{}{:02}:{:02}:{:02}.{:06}",
                sign, total_hours, mins, secs, micros
            ))
        }
    }
}

fn convert_rows(mysql_rows: Vec<MySqlRow>) -> (Vec<ColumnMeta>, Vec<Row>) {
    let mut columns = Vec::new();
    let mut column_names = Vec::new();
    let mut column_types = Vec::new();

    if let Some(first_row) = mysql_rows.first() {
        for (idx, col) in first_row.columns_ref().iter().enumerate() {
            let name = col.name_str().to_string();
            column_names.push(name.clone());
            column_types.push(col.column_type());

            columns.push(ColumnMeta::new(name, idx));
        }
    }

    let mut rows = Vec::with_capacity(mysql_rows.len());
    for mysql_row in mysql_rows {
        let values = (0..columns.len())
            .map(|idx| {
                let mysql_val: mysql_async::Value =
                    mysql_row.get(idx).unwrap_or(mysql_async::Value::NULL);
                let col_type = column_types
                    .get(idx)
                    .copied()
                    .unwrap_or(ColumnType::MYSQL_TYPE_STRING);
                mysql_value_to_value(mysql_val, col_type)
            })
            .collect();
        rows.push(Row::new(column_names.clone(), values));
    }

    (columns, rows)
}

#[async_trait]
impl Connection for MySqlConnection {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    fn explain_config(&self) -> ExplainConfig {
        ExplainConfig::mysql()
    }

    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let mut conn = self.get_conn().await?;

        let start_time = Instant::now();
        let mysql_rows: Vec<MySqlRow> = conn
            .query(sql)
            .await
            .map_err(|e| SqlProbeError::Query(format!("Failed to execute query: {}", e)))?;
        let execution_time = start_time.elapsed();

        let (columns, rows) = convert_rows(mysql_rows);

        tracing::debug!(
            row_count = rows.len(),
            execution_time_ms = execution_time.as_millis() as u64,
            "query executed successfully"
        );

        Ok(QueryResult {
            columns,
            rows,
            execution_time,
        })
    }

    async fn close(&self) -> Result<()> {
        tracing::info!("closing MySQL connection pool");
        self.pool
            .clone()
            .disconnect()
            .await
            .map_err(|e| SqlProbeError::Connection(format!("Failed to close MySQL connection: {}", e)))
    }
}
