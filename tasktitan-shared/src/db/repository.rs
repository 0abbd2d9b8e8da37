/// Table-driven CRUD shared by every entity
///
/// Users, tasks and notes all follow the same shape: an auto-increment
/// surrogate key plus a flat list of columns. [`Entity`] describes that shape
/// and [`Repository`] turns it into parameterised SQL, so each model only
/// declares its table and maps its own input types to [`SqlValue`]s.
///
/// Identifiers in the generated SQL always come from the entity's constants;
/// caller-supplied column names are checked against them before any SQL runs.
///
/// # Example
///
/// ```no_run
/// use tasktitan_shared::db::repository::{Repository, SqlValue};
/// use tasktitan_shared::models::task::Task;
/// use sqlx::SqliteConnection;
///
/// # async fn example(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
/// let tasks = Repository::<Task>::find_where(conn, "user_id", SqlValue::Integer(1)).await?;
/// println!("{} tasks", tasks.len());
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqliteArguments, SqliteConnection, SqliteRow},
    Arguments, Error, FromRow,
};
use std::marker::PhantomData;

/// A table with a single integer surrogate key
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    /// Table name
    const TABLE: &'static str;

    /// Auto-increment primary key column
    const PRIMARY_KEY: &'static str;

    /// Every other column, in insert order
    const COLUMNS: &'static [&'static str];
}

/// A value bound to a statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

fn arguments<'q>(values: impl IntoIterator<Item = SqlValue>) -> SqliteArguments<'q> {
    let mut args = SqliteArguments::default();
    for value in values {
        match value {
            SqlValue::Integer(v) => args.add(v),
            SqlValue::Text(v) => args.add(v),
            SqlValue::Date(v) => args.add(v),
            SqlValue::Null => args.add(Option::<String>::None),
        }
    }
    args
}

/// Generic CRUD operations over an [`Entity`]
///
/// Stateless; every operation takes the connection of the surrounding
/// transaction.
pub struct Repository<E>(PhantomData<E>);

impl<E: Entity> Repository<E> {
    fn check_column(column: &str) -> Result<(), Error> {
        if column == E::PRIMARY_KEY || E::COLUMNS.contains(&column) {
            Ok(())
        } else {
            Err(Error::ColumnNotFound(format!("{}.{}", E::TABLE, column)))
        }
    }

    fn select_sql() -> String {
        format!(
            "SELECT {}, {} FROM {}",
            E::PRIMARY_KEY,
            E::COLUMNS.join(", "),
            E::TABLE
        )
    }

    fn insert_sql() -> String {
        let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders
        )
    }

    fn update_sql(columns: &[&str], keep_existing: bool) -> String {
        let assignments = columns
            .iter()
            .map(|column| {
                if keep_existing {
                    format!("{column} = COALESCE(?, {column})")
                } else {
                    format!("{column} = ?")
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "UPDATE {} SET {} WHERE {} = ?",
            E::TABLE,
            assignments,
            E::PRIMARY_KEY
        )
    }

    /// Inserts a row and returns its generated key
    ///
    /// `values` must line up with [`Entity::COLUMNS`].
    pub async fn insert(conn: &mut SqliteConnection, values: Vec<SqlValue>) -> Result<i64, Error> {
        if values.len() != E::COLUMNS.len() {
            return Err(Error::Protocol(format!(
                "{} expects {} values, got {}",
                E::TABLE,
                E::COLUMNS.len(),
                values.len()
            )));
        }

        let sql = Self::insert_sql();
        let result = sqlx::query_with(&sql, arguments(values))
            .execute(&mut *conn)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetches one row by primary key
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<E>, Error> {
        let sql = format!("{} WHERE {} = ?", Self::select_sql(), E::PRIMARY_KEY);

        sqlx::query_as_with::<_, E, _>(&sql, arguments([SqlValue::Integer(id)]))
            .fetch_optional(&mut *conn)
            .await
    }

    /// Fetches every row whose `column` equals `value`, in insertion order
    pub async fn find_where(
        conn: &mut SqliteConnection,
        column: &str,
        value: SqlValue,
    ) -> Result<Vec<E>, Error> {
        Self::check_column(column)?;
        let sql = format!(
            "{} WHERE {} = ? ORDER BY {}",
            Self::select_sql(),
            column,
            E::PRIMARY_KEY
        );

        sqlx::query_as_with::<_, E, _>(&sql, arguments([value]))
            .fetch_all(&mut *conn)
            .await
    }

    /// Updates the given columns, keeping the stored value wherever the new
    /// value is [`SqlValue::Null`]
    ///
    /// Returns the number of rows matched; zero when `assignments` is empty.
    pub async fn update_partial(
        conn: &mut SqliteConnection,
        id: i64,
        assignments: Vec<(&'static str, SqlValue)>,
    ) -> Result<u64, Error> {
        Self::update(conn, id, assignments, true).await
    }

    /// Updates the given columns unconditionally
    ///
    /// Returns the number of rows matched; zero when `assignments` is empty.
    pub async fn overwrite(
        conn: &mut SqliteConnection,
        id: i64,
        assignments: Vec<(&'static str, SqlValue)>,
    ) -> Result<u64, Error> {
        Self::update(conn, id, assignments, false).await
    }

    async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        assignments: Vec<(&'static str, SqlValue)>,
        keep_existing: bool,
    ) -> Result<u64, Error> {
        if assignments.is_empty() {
            return Ok(0);
        }

        let mut columns = Vec::with_capacity(assignments.len());
        let mut values = Vec::with_capacity(assignments.len() + 1);
        for (column, value) in assignments {
            Self::check_column(column)?;
            columns.push(column);
            values.push(value);
        }
        values.push(SqlValue::Integer(id));

        let sql = Self::update_sql(&columns, keep_existing);
        let result = sqlx::query_with(&sql, arguments(values))
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes one row by primary key, returning the number of rows removed
    pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> Result<u64, Error> {
        Self::delete_where(conn, E::PRIMARY_KEY, SqlValue::Integer(id)).await
    }

    /// Deletes every row whose `column` equals `value`
    pub async fn delete_where(
        conn: &mut SqliteConnection,
        column: &str,
        value: SqlValue,
    ) -> Result<u64, Error> {
        Self::check_column(column)?;
        let sql = format!("DELETE FROM {} WHERE {} = ?", E::TABLE, column);

        let result = sqlx::query_with(&sql, arguments([value]))
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
