#![allow(dead_code)]

use crudkit_core::db::{open_db_in_memory, Migration};
use crudkit_core::{Entity, EntityId, FieldValues, Fields};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

pub const MIGRATIONS: &[Migration] = &[
    Migration::new(
        1,
        "CREATE TABLE categories (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );",
    ),
    Migration::new(
        2,
        "CREATE TABLE items (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL DEFAULT 'unnamed',
            sku TEXT UNIQUE,
            quantity INTEGER NOT NULL DEFAULT 0,
            category_id INTEGER REFERENCES categories(id)
        );",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: i64,
    pub category_id: Option<EntityId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub category_id: Option<EntityId>,
}

#[derive(Debug, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub category_id: Option<EntityId>,
}

fn present_fields(
    name: &Option<String>,
    sku: &Option<String>,
    quantity: Option<i64>,
    category_id: Option<EntityId>,
) -> FieldValues {
    let mut fields = Vec::new();
    if let Some(name) = name {
        fields.push(("name", Value::Text(name.clone())));
    }
    if let Some(sku) = sku {
        fields.push(("sku", Value::Text(sku.clone())));
    }
    if let Some(quantity) = quantity {
        fields.push(("quantity", Value::Integer(quantity)));
    }
    if let Some(category_id) = category_id {
        fields.push(("category_id", Value::Integer(category_id)));
    }
    fields
}

impl Fields for ItemDraft {
    fn fields(&self) -> FieldValues {
        present_fields(&self.name, &self.sku, self.quantity, self.category_id)
    }
}

impl Fields for ItemPatch {
    fn fields(&self) -> FieldValues {
        present_fields(&self.name, &self.sku, self.quantity, self.category_id)
    }
}

impl Entity for Item {
    const TABLE: &'static str = "items";
    const COLUMNS: &'static [&'static str] = &["id", "name", "sku", "quantity", "category_id"];
    type Draft = ItemDraft;
    type Patch = ItemPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            sku: row.get("sku")?,
            quantity: row.get("quantity")?,
            category_id: row.get("category_id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDraft {
    pub name: String,
}

impl Fields for CategoryDraft {
    fn fields(&self) -> FieldValues {
        vec![("name", Value::Text(self.name.clone()))]
    }
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["id", "name"];
    type Draft = CategoryDraft;
    type Patch = CategoryDraft;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// Entity whose table is never created.
#[derive(Debug)]
pub struct Ghost {
    pub id: EntityId,
}

impl Entity for Ghost {
    const TABLE: &'static str = "ghosts";
    const COLUMNS: &'static [&'static str] = &["id"];
    type Draft = ItemDraft;
    type Patch = ItemPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self { id: row.get("id")? })
    }
}

pub fn open_store() -> Connection {
    open_db_in_memory(MIGRATIONS).unwrap()
}

pub fn attrs(value: JsonValue) -> Map<String, JsonValue> {
    value.as_object().cloned().unwrap()
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
