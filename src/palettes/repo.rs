use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

/// Palette record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Palette {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Color row belonging to a palette. Position is the zero-based display
/// order, dense and unique within the palette.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Color {
    pub palette_id: Uuid,
    pub hex_code: String,
    pub position: i32,
}

/// Pairs each hex code with its zero-based position, in input order.
fn positioned(colors: &[String]) -> Vec<(i32, &str)> {
    colors
        .iter()
        .enumerate()
        .map(|(i, hex)| (i as i32, hex.as_str()))
        .collect()
}

async fn insert_colors(
    tx: &mut Transaction<'_, Postgres>,
    palette_id: Uuid,
    colors: &[String],
) -> sqlx::Result<()> {
    for (position, hex) in positioned(colors) {
        sqlx::query(
            r#"
            INSERT INTO colors (palette_id, hex_code, position)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(palette_id)
        .bind(hex)
        .bind(position)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Inserts a palette and its colors in one transaction.
pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    title: Option<&str>,
    theme: Option<&str>,
    description: Option<&str>,
    colors: &[String],
) -> sqlx::Result<Palette> {
    let mut tx = db.begin().await?;

    let palette = sqlx::query_as::<_, Palette>(
        r#"
        INSERT INTO palettes (user_id, title, theme, description)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, title, theme, description, created_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(theme)
    .bind(description)
    .fetch_one(&mut *tx)
    .await?;

    insert_colors(&mut tx, palette.id, colors).await?;

    tx.commit().await?;
    Ok(palette)
}

/// Every palette regardless of owner, colors ordered by position.
pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<(Palette, Vec<Color>)>> {
    let palettes = sqlx::query_as::<_, Palette>(
        r#"
        SELECT id, user_id, title, theme, description, created_at
        FROM palettes
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(db)
    .await?;

    let colors = sqlx::query_as::<_, Color>(
        r#"
        SELECT palette_id, hex_code, position
        FROM colors
        ORDER BY palette_id, position
        "#,
    )
    .fetch_all(db)
    .await?;

    let mut by_palette: HashMap<Uuid, Vec<Color>> = HashMap::new();
    for color in colors {
        by_palette.entry(color.palette_id).or_default().push(color);
    }

    Ok(palettes
        .into_iter()
        .map(|palette| {
            let colors = by_palette.remove(&palette.id).unwrap_or_default();
            (palette, colors)
        })
        .collect())
}

/// A single palette with its colors ordered by position.
pub async fn get(db: &PgPool, id: Uuid) -> sqlx::Result<Option<(Palette, Vec<Color>)>> {
    let Some(palette) = sqlx::query_as::<_, Palette>(
        r#"
        SELECT id, user_id, title, theme, description, created_at
        FROM palettes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    else {
        return Ok(None);
    };

    let colors = sqlx::query_as::<_, Color>(
        r#"
        SELECT palette_id, hex_code, position
        FROM colors
        WHERE palette_id = $1
        ORDER BY position
        "#,
    )
    .bind(id)
    .fetch_all(db)
    .await?;

    Ok(Some((palette, colors)))
}

/// Owner probe backing the 404/403 split in the write handlers.
pub async fn owner_of(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Uuid>> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT user_id FROM palettes WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|(user_id,)| user_id))
}

/// Overwrites the palette metadata and replaces the whole color set with
/// fresh zero-based positions, in one transaction.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    title: Option<&str>,
    theme: Option<&str>,
    description: Option<&str>,
    colors: &[String],
) -> sqlx::Result<()> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        UPDATE palettes
        SET title = $1, theme = $2, description = $3
        WHERE id = $4
        "#,
    )
    .bind(title)
    .bind(theme)
    .bind(description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        DELETE FROM colors WHERE palette_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    insert_colors(&mut tx, id, colors).await?;

    tx.commit().await?;
    Ok(())
}

/// Deletes a palette and its colors in one transaction.
pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<()> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM colors WHERE palette_id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        DELETE FROM palettes WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
