// src/screens/crud.rs

//! Controlador genérico das telas de cadastro: lista + formulário.
//!
//! Dois estados apenas: criação (`editing = None`, o envio faz POST) e
//! edição (`editing = Some`, o envio faz PUT no id). Não há atualização
//! otimista: toda mutação bem-sucedida recarrega a lista, e toda falha vira
//! uma notificação deixando o estado como estava.

use std::sync::Arc;

use validator::Validate;

use crate::{
    api::{
        backend::{Backend, RequestBody},
        resources,
    },
    common::{error::AppError, filter::filter_by},
    models::{EntityForm, References, Resource, lote::Lote},
    screens::notifications::{Notification, Notifier},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(i64),
}

pub struct CrudScreen<R: Resource> {
    pub(super) backend: Arc<dyn Backend>,
    pub(super) items: Vec<R>,
    pub(super) editing: Option<R>,
    pub(super) form: R::Form,
    pub(super) filter: String,
    pub(super) references: References,
    pub(super) notifier: Notifier,
}

async fn load_lotes(backend: &dyn Backend, needed: bool) -> Result<Vec<Lote>, AppError> {
    if needed {
        resources::list::<Lote>(backend).await
    } else {
        Ok(Vec::new())
    }
}

impl<R: Resource> CrudScreen<R> {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            items: Vec::new(),
            editing: None,
            form: R::Form::default(),
            filter: String::new(),
            references: References::default(),
            notifier: Notifier::default(),
        }
    }

    // ---
    // Carga
    // ---

    /// Busca a lista (e os lotes, se a tela precisar) ao abrir a tela.
    pub async fn mount(&mut self) -> Result<(), AppError> {
        let result = self.load().await;
        self.surface(result)
    }

    /// Recarrega só a lista principal.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let result = resources::list::<R>(self.backend.as_ref()).await;
        let items = self.surface(result)?;
        self.set_items(items);
        Ok(())
    }

    async fn load(&mut self) -> Result<(), AppError> {
        let backend = self.backend.as_ref();
        let (items, lotes) = tokio::try_join!(
            resources::list::<R>(backend),
            load_lotes(backend, R::NEEDS_LOTES),
        )?;
        self.references.lotes = lotes;
        self.set_items(items);
        Ok(())
    }

    fn set_items(&mut self, items: Vec<R>) {
        R::publish(&items, &mut self.references);
        self.items = items;
    }

    /// Depois de uma mutação: recarrega a lista (e os lotes, cujo saldo pode
    /// ter mudado). As duas buscas são independentes: a falha de uma não
    /// descarta a outra e só vira notificação, pois a mutação já ocorreu.
    pub(super) async fn reload_after_mutation(&mut self) {
        let backend = self.backend.as_ref();
        let (items, lotes) = tokio::join!(
            resources::list::<R>(backend),
            load_lotes(backend, R::NEEDS_LOTES),
        );

        if let Ok(items) = self.surface(items) {
            self.set_items(items);
        }
        if let Ok(lotes) = self.surface(lotes) {
            self.references.lotes = lotes;
        }
    }

    // ---
    // Estado de edição
    // ---

    pub fn mode(&self) -> Mode {
        match &self.editing {
            Some(item) => Mode::Edit(item.id()),
            None => Mode::Create,
        }
    }

    pub fn editing(&self) -> Option<&R> {
        self.editing.as_ref()
    }

    /// Criação -> edição: preenche o formulário com o registro da lista.
    pub fn start_edit(&mut self, id: i64) -> Result<(), AppError> {
        let Some(item) = self.find(id).cloned() else {
            return self.surface(Err(AppError::NotFound));
        };
        self.form = item.to_form();
        self.editing = Some(item);
        Ok(())
    }

    /// Edição -> criação sem enviar nada.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = R::Form::default();
    }

    pub fn form(&self) -> &R::Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut R::Form {
        &mut self.form
    }

    // ---
    // Envio
    // ---

    /// Valida, sanitiza e envia o formulário (POST na criação, PUT na edição).
    pub async fn submit(&mut self) -> Result<(), AppError> {
        let editing_id = self.editing.as_ref().map(R::id);

        let result = self.send_form(editing_id).await;
        self.surface(result)?;

        let message = match editing_id {
            None => format!("Cadastro de {} realizado com sucesso!", R::NOUN),
            Some(_) => format!("Alterações de {} salvas com sucesso!", R::NOUN),
        };
        tracing::info!("✅ {}", message);
        self.notifier.push(Notification::success(message));

        self.cancel_edit();
        self.reload_after_mutation().await;
        Ok(())
    }

    async fn send_form(&self, editing_id: Option<i64>) -> Result<(), AppError> {
        // 1. Campos obrigatórios
        self.form.validate()?;

        // 2. Máscaras removidas, números e datas convertidos
        let mut payload = self.form.to_payload()?;

        // 3. Limites numéricos
        payload.validate()?;

        // 4. Checagens contra as listas carregadas
        self.form
            .apply_references(&mut payload, &self.references, editing_id)?;

        let body = match (self.form.attachment(), R::MULTIPART_FILE_FIELD) {
            (file, Some(field)) => RequestBody::multipart(&payload, field, file)?,
            (Some(file), None) => RequestBody::multipart(&payload, "arquivo", Some(file))?,
            (None, None) => RequestBody::json(&payload)?,
        };

        let backend = self.backend.as_ref();
        match editing_id {
            None => resources::create::<R>(backend, body).await?,
            Some(id) => resources::update::<R>(backend, id, body).await?,
        };
        Ok(())
    }

    // ---
    // Exclusão
    // ---

    /// Exclui após confirmação. Devolve `false` se o usuário desistiu.
    pub async fn delete<F>(&mut self, id: i64, confirm: F) -> Result<bool, AppError>
    where
        F: FnOnce(&R) -> bool,
    {
        let Some(item) = self.find(id) else {
            return self.surface(Err(AppError::NotFound));
        };
        if !confirm(item) {
            return Ok(false);
        }

        let result = resources::delete::<R>(self.backend.as_ref(), id).await;
        self.surface(result)?;

        tracing::info!("🗑️ {} {} excluído", R::NOUN, id);
        self.notifier
            .push(Notification::success(format!("Exclusão de {} concluída.", R::NOUN)));

        if self.editing.as_ref().is_some_and(|e| e.id() == id) {
            self.cancel_edit();
        }
        self.reload_after_mutation().await;
        Ok(true)
    }

    // ---
    // Lista e filtro local
    // ---

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Itens que passam no filtro; filtro vazio mostra todos.
    pub fn visible(&self) -> Vec<&R> {
        filter_by(&self.items, &self.filter, R::search_text)
    }

    pub fn references(&self) -> &References {
        &self.references
    }

    // ---
    // Notificações
    // ---

    pub fn notifications(&self) -> &[Notification] {
        self.notifier.pending()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifier.take()
    }

    /// Converte a falha em notificação e registra no log; o estado fica intacto.
    pub(super) fn surface<T>(&mut self, result: Result<T, AppError>) -> Result<T, AppError> {
        result.map_err(|e| {
            tracing::warn!("⚠️ Falha na tela de {}: {}", R::NOUN, e);
            self.notifier.push(e.to_notification());
            e
        })
    }
}
