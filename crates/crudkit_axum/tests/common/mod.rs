#![allow(dead_code)]

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use crudkit_axum::{
    with_error_translation, with_query_defaults, ApiError, ApiResult, Envelope, ListQuery,
};
use crudkit_core::db::{open_db_in_memory, Migration};
use crudkit_core::{
    CoreConfig, CoreError, CrudService, Entity, EntityId, FieldValues, Fields, HandlerTable,
    Service, SqliteRepository,
};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::sync::{Arc, Mutex};

const MIGRATIONS: &[Migration] = &[Migration::new(
    1,
    "CREATE TABLE widgets (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        size INTEGER NOT NULL DEFAULT 1
    );",
)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    pub id: EntityId,
    pub name: String,
    pub size: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetDraft {
    pub name: String,
    pub size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetPatch {
    pub name: Option<String>,
    pub size: Option<i64>,
}

impl Fields for WidgetDraft {
    fn fields(&self) -> FieldValues {
        let mut fields = vec![("name", Value::Text(self.name.clone()))];
        if let Some(size) = self.size {
            fields.push(("size", Value::Integer(size)));
        }
        fields
    }
}

impl Fields for WidgetPatch {
    fn fields(&self) -> FieldValues {
        let mut fields = Vec::new();
        if let Some(name) = &self.name {
            fields.push(("name", Value::Text(name.clone())));
        }
        if let Some(size) = self.size {
            fields.push(("size", Value::Integer(size)));
        }
        fields
    }
}

impl Entity for Widget {
    const TABLE: &'static str = "widgets";
    const COLUMNS: &'static [&'static str] = &["id", "name", "size"];
    type Draft = WidgetDraft;
    type Patch = WidgetPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            size: row.get("size")?,
        })
    }
}

pub type Db = Arc<Mutex<Connection>>;

fn with_service<T>(
    db: &Db,
    op: impl FnOnce(&CrudService<SqliteRepository<'_, Widget>>) -> Result<T, CoreError>,
) -> Result<T, ApiError> {
    let conn = db
        .lock()
        .map_err(|_| CoreError::internal("connection lock poisoned"))?;
    let service = CrudService::new(SqliteRepository::<Widget>::new(&conn));
    Ok(op(&service)?)
}

fn widget_id(path: Result<Path<EntityId>, PathRejection>) -> Result<EntityId, ApiError> {
    let Path(id) = path?;
    Ok(id)
}

async fn list_widgets(
    State(db): State<Db>,
    ListQuery(params): ListQuery,
) -> ApiResult<Vec<Widget>> {
    let widgets = with_service(&db, |service| service.fetch_many_items(&params))?;
    Ok(Envelope::ok(widgets))
}

async fn create_widget(
    State(db): State<Db>,
    body: Result<Json<Map<String, JsonValue>>, JsonRejection>,
) -> ApiResult<Widget> {
    let Json(attrs) = body?;
    let widget = with_service(&db, |service| service.create_item(&attrs))?;
    Ok(Envelope::created(widget))
}

async fn fetch_widget(
    State(db): State<Db>,
    id: Result<Path<EntityId>, PathRejection>,
) -> ApiResult<Widget> {
    let id = widget_id(id)?;
    let widget = with_service(&db, |service| service.fetch_item(id))?;
    Ok(Envelope::ok(widget))
}

async fn patch_widget(
    State(db): State<Db>,
    id: Result<Path<EntityId>, PathRejection>,
    body: Result<Json<WidgetPatch>, JsonRejection>,
) -> ApiResult<Widget> {
    let id = widget_id(id)?;
    let Json(patch) = body?;
    let widget = with_service(&db, |service| service.update_item(id, &patch))?;
    Ok(Envelope::ok(widget))
}

async fn delete_widget(
    State(db): State<Db>,
    id: Result<Path<EntityId>, PathRejection>,
) -> ApiResult<()> {
    let id = widget_id(id)?;
    with_service(&db, |service| service.delete_item(id))?;
    Ok(Envelope::ok(()))
}

pub fn app() -> Router {
    app_with_config(&CoreConfig::default())
}

pub fn app_with_config(config: &CoreConfig) -> Router {
    let conn = open_db_in_memory(MIGRATIONS).unwrap();
    let db: Db = Arc::new(Mutex::new(conn));

    let router = Router::new()
        .route("/widgets", get(list_widgets).post(create_widget))
        .route(
            "/widgets/{id}",
            get(fetch_widget).patch(patch_widget).delete(delete_widget),
        )
        .with_state(db);
    let router = with_query_defaults(router, config);
    with_error_translation(router, Arc::new(HandlerTable::standard()))
}
