use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

use super::dto::{ColorEntry, CreatedPaletteResponse, MessageResponse, PaletteDetails, PaletteInput};
use super::repo::{self, Color, Palette};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/palettes", get(list_palettes))
        .route("/palettes/:id", get(get_palette))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/palettes", post(create_palette))
        .route("/palettes/:id", put(update_palette).delete(delete_palette))
}

fn to_details((palette, colors): (Palette, Vec<Color>)) -> PaletteDetails {
    PaletteDetails {
        id: palette.id,
        title: palette.title,
        theme: palette.theme,
        description: palette.description,
        created_at: palette.created_at,
        colors: colors
            .into_iter()
            .map(|c| ColorEntry {
                hex: c.hex_code,
                position: c.position,
            })
            .collect(),
    }
}

/// 404 if the palette is absent, 403 if it belongs to someone else.
async fn check_owner(db: &PgPool, palette_id: Uuid, requester: Uuid) -> Result<(), ApiError> {
    match repo::owner_of(db, palette_id).await? {
        None => Err(ApiError::NotFound("Palette not found".into())),
        Some(owner) if owner != requester => {
            warn!(palette_id = %palette_id, user_id = %requester, "palette owned by another user");
            Err(ApiError::Forbidden("Not authorized".into()))
        }
        Some(_) => Ok(()),
    }
}

#[instrument(skip(state))]
pub async fn list_palettes(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaletteDetails>>, ApiError> {
    let rows = repo::list_all(&state.db).await?;
    Ok(Json(rows.into_iter().map(to_details).collect()))
}

#[instrument(skip(state))]
pub async fn get_palette(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaletteDetails>, ApiError> {
    let row = repo::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Palette not found".into()))?;
    Ok(Json(to_details(row)))
}

#[instrument(skip(state, payload))]
pub async fn create_palette(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PaletteInput>,
) -> Result<(StatusCode, Json<CreatedPaletteResponse>), ApiError> {
    let palette = repo::create(
        &state.db,
        user_id,
        payload.title.as_deref(),
        payload.theme.as_deref(),
        payload.description.as_deref(),
        &payload.colors,
    )
    .await?;

    info!(palette_id = %palette.id, user_id = %user_id, "palette created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedPaletteResponse {
            message: "Palette created!".into(),
            palette_id: palette.id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_palette(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaletteInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    check_owner(&state.db, id, user_id).await?;

    repo::update(
        &state.db,
        id,
        payload.title.as_deref(),
        payload.theme.as_deref(),
        payload.description.as_deref(),
        &payload.colors,
    )
    .await?;

    info!(palette_id = %id, user_id = %user_id, "palette updated");
    Ok(Json(MessageResponse {
        message: "Palette updated!".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_palette(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    check_owner(&state.db, id, user_id).await?;

    repo::delete(&state.db, id).await?;

    info!(palette_id = %id, user_id = %user_id, "palette deleted");
    Ok(Json(MessageResponse {
        message: "Palette deleted!".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn details_preserve_color_order() {
        let palette = Palette {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: Some("Mono".into()),
            theme: None,
            description: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let colors = vec![
            Color {
                palette_id: palette.id,
                hex_code: "#FFFFFF".into(),
                position: 0,
            },
            Color {
                palette_id: palette.id,
                hex_code: "#000000".into(),
                position: 1,
            },
            Color {
                palette_id: palette.id,
                hex_code: "#123456".into(),
                position: 2,
            },
        ];

        let details = to_details((palette, colors));
        let hexes: Vec<&str> = details.colors.iter().map(|c| c.hex.as_str()).collect();
        assert_eq!(hexes, vec!["#FFFFFF", "#000000", "#123456"]);
        let positions: Vec<i32> = details.colors.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn details_with_no_colors_yield_empty_list() {
        let palette = Palette {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: None,
            theme: None,
            description: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let details = to_details((palette, Vec::new()));
        assert!(details.colors.is_empty());
    }
}
