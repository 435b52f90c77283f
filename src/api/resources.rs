// src/api/resources.rs

//! Operações CRUD tipadas sobre qualquer `Resource`:
//! `GET/POST /api/<recurso>` e `PUT/DELETE /api/<recurso>/<id>`.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::backend::{Backend, RequestBody},
    common::error::AppError,
    models::Resource,
};

pub fn collection_path<R: Resource>() -> String {
    format!("/api/{}", R::PATH)
}

pub fn item_path<R: Resource>(id: i64) -> String {
    format!("/api/{}/{}", R::PATH, id)
}

/// Converte o corpo no tipo esperado; formato inesperado vira `AppError::Decode`.
pub fn parse<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    Ok(serde_json::from_value(value)?)
}

/// Aceita a lista pura ou envelopada em `{ "data": [...] }`.
pub fn parse_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, AppError> {
    match value {
        Value::Object(mut obj) if obj.contains_key("data") => {
            parse(obj.remove("data").unwrap_or(Value::Null))
        }
        other => parse(other),
    }
}

pub async fn list<R: Resource>(backend: &dyn Backend) -> Result<Vec<R>, AppError> {
    let body = backend.get(&collection_path::<R>()).await?;
    parse_list(body)
}

pub async fn create<R: Resource>(backend: &dyn Backend, body: RequestBody) -> Result<Value, AppError> {
    backend.send(Method::POST, &collection_path::<R>(), body).await
}

pub async fn update<R: Resource>(
    backend: &dyn Backend,
    id: i64,
    body: RequestBody,
) -> Result<Value, AppError> {
    backend.send(Method::PUT, &item_path::<R>(id), body).await
}

pub async fn delete<R: Resource>(backend: &dyn Backend, id: i64) -> Result<(), AppError> {
    backend
        .send(Method::DELETE, &item_path::<R>(id), RequestBody::Empty)
        .await?;
    Ok(())
}
