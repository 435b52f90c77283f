use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use agrobov::api::backend::{Attachment, Backend, RequestBody};
use agrobov::api::response::normalize;
use agrobov::common::error::AppError;
use agrobov::models::gastovet::GastoVet;
use agrobov::models::lote::Lote;
use agrobov::models::vacina::Vacina;
use agrobov::models::venda::Venda;
use agrobov::screens::{CrudScreen, DashboardScreen, Mode, NotificationKind};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

// Backend falso: responde listas fixas aos GETs e registra cada chamada.
#[derive(Default)]
struct FakeBackend {
    lists: Mutex<HashMap<String, Value>>,
    // Quando presente, as mutações respondem com este status/corpo
    mutation_failure: Mutex<Option<(u16, String)>>,
    get_failure: Mutex<Option<(String, u16)>>,
    calls: Mutex<Vec<(Method, String, RequestBody)>>,
}

impl FakeBackend {
    fn with_list(self, path: &str, rows: Value) -> Self {
        self.lists.lock().unwrap().insert(path.to_string(), rows);
        self
    }

    fn set_list(&self, path: &str, rows: Value) {
        self.lists.lock().unwrap().insert(path.to_string(), rows);
    }

    fn fail_mutations(&self, status: u16, body: &str) {
        *self.mutation_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    fn fail_get(&self, path: &str, status: u16) {
        *self.get_failure.lock().unwrap() = Some((path.to_string(), status));
    }

    fn calls(&self) -> Vec<(Method, String, RequestBody)> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, method: Method, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(m, p, _)| *m == method && p == path)
            .count()
    }

    fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<Value, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.clone(), path.to_string(), body));

        if method == Method::GET {
            if let Some((failing, status)) = self.get_failure.lock().unwrap().clone() {
                if failing == path {
                    return normalize(status, "");
                }
            }
            let lists = self.lists.lock().unwrap();
            return Ok(lists.get(path).cloned().unwrap_or_else(|| json!([])));
        }

        if let Some((status, text)) = self.mutation_failure.lock().unwrap().clone() {
            return normalize(status, &text);
        }
        Ok(json!({ "id": 99 }))
    }
}

fn lotes_json() -> Value {
    json!([
        {
            "id": 1, "numero_lote": "L-001", "quantidade": 10, "peso": 350.0,
            "valor_individual": 2500.0, "idade_media": 14, "data_compra": "2024-02-01"
        },
        {
            "id": 2, "numero_lote": "L-002", "quantidade": 30, "peso": 410.5,
            "valor_individual": 2800.0, "idade_media": 20, "data_compra": "2024-03-15T00:00:00.000Z"
        }
    ])
}

fn vendas_json() -> Value {
    json!([
        {
            "id": 7, "lote_id": 2, "numero_lote": "L-002", "comprador": "Frigorífico Sul",
            "cpf_cnpj_comprador": "12345678000190", "valor_unitario": 3000.0,
            "quantidade_vendida": 5, "prazo_pagamento": null, "data_compra": "2024-06-01",
            "recebido": false, "documento": null
        }
    ])
}

fn screen<R: agrobov::models::Resource>(backend: &Arc<FakeBackend>) -> CrudScreen<R> {
    CrudScreen::new(backend.clone())
}

#[tokio::test]
async fn create_posts_sanitized_payload_once_and_refetches_once() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();
    assert_eq!(lotes.items().len(), 2);
    backend.clear_calls();

    {
        let form = lotes.form_mut();
        form.numero_lote = "L-003".into();
        form.quantidade = "25".into();
        form.peso = "320,5".into();
        form.valor_individual = "R$ 1.500,75".into();
        form.data_compra = "2024-07-01".into();
    }
    lotes.submit().await.unwrap();

    assert_eq!(backend.count(Method::POST, "/api/lote"), 1);
    assert_eq!(backend.count(Method::GET, "/api/lote"), 1);

    let (_, _, body) = backend
        .calls()
        .into_iter()
        .find(|(m, _, _)| *m == Method::POST)
        .unwrap();
    let RequestBody::Json(payload) = body else {
        panic!("esperava JSON");
    };
    assert_eq!(payload["numero_lote"], "L-003");
    assert_eq!(payload["quantidade"], 25);
    assert_eq!(payload["peso"], 320.5);
    assert_eq!(payload["valor_individual"], 1500.75);
    assert_eq!(payload["data_compra"], "2024-07-01");

    assert_eq!(lotes.mode(), Mode::Create);
    assert!(lotes.form().numero_lote.is_empty());
    let toasts = lotes.take_notifications();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, NotificationKind::Success);
}

#[tokio::test]
async fn edit_puts_to_the_selected_id_and_returns_to_create_mode() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();

    lotes.start_edit(2).unwrap();
    assert_eq!(lotes.mode(), Mode::Edit(2));
    assert_eq!(lotes.form().numero_lote, "L-002");
    assert_eq!(lotes.form().valor_individual, "R$ 2.800,00");

    lotes.form_mut().quantidade = "28".into();
    backend.clear_calls();
    lotes.submit().await.unwrap();

    assert_eq!(backend.count(Method::PUT, "/api/lote/2"), 1);
    assert_eq!(backend.count(Method::POST, "/api/lote"), 0);
    assert_eq!(backend.count(Method::GET, "/api/lote"), 1);
    assert_eq!(lotes.mode(), Mode::Create);
}

#[tokio::test]
async fn failed_update_stays_in_edit_mode_without_refetch() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();
    lotes.start_edit(1).unwrap();

    backend.fail_mutations(
        400,
        r#"{"error": "Um ou mais campos são inválidos.", "details": {"numero_lote": ["Número já usado."]}}"#,
    );
    backend.clear_calls();

    let err = lotes.submit().await.unwrap_err();
    assert!(matches!(err, AppError::Rejected { .. }));
    assert_eq!(lotes.mode(), Mode::Edit(1));
    assert_eq!(backend.count(Method::PUT, "/api/lote/1"), 1);
    assert_eq!(backend.count(Method::GET, "/api/lote"), 0);

    let toasts = lotes.take_notifications();
    assert_eq!(toasts.len(), 1);
    assert!(toasts[0].is_error());
    assert_eq!(toasts[0].message, "Número já usado.");
}

#[tokio::test]
async fn sale_above_lot_balance_is_blocked_before_any_request() {
    let backend = Arc::new(
        FakeBackend::default()
            .with_list("/api/lote", lotes_json())
            .with_list("/api/venda", vendas_json()),
    );
    let mut vendas = screen::<Venda>(&backend);
    vendas.mount().await.unwrap();
    assert_eq!(vendas.references().lotes.len(), 2);
    backend.clear_calls();

    {
        let form = vendas.form_mut();
        form.lote_id = "1".into();
        form.comprador = "Fazenda Norte".into();
        form.cpf_cnpj_comprador = "123.456.789-01".into();
        form.valor_unitario = "R$ 3.000,00".into();
        form.quantidade_vendida = "11".into();
        form.data_compra = "2024-07-10".into();
    }
    let err = vendas.submit().await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(backend.calls().is_empty());
    let toasts = vendas.take_notifications();
    assert!(toasts[0].message.contains("excede o disponível no lote L-001"));
}

#[tokio::test]
async fn sale_within_balance_goes_multipart_with_lot_number_filled() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut vendas = screen::<Venda>(&backend);
    vendas.mount().await.unwrap();
    backend.clear_calls();

    {
        let form = vendas.form_mut();
        form.lote_id = "1".into();
        form.comprador = "Fazenda Norte".into();
        form.cpf_cnpj_comprador = "123.456.789-01".into();
        form.valor_unitario = "R$ 3.000,00".into();
        form.quantidade_vendida = "10".into();
        form.data_compra = "2024-07-10".into();
        form.documento = Some(Attachment {
            file_name: "nota.pdf".into(),
            mime: "application/pdf".into(),
            bytes: b"%PDF".to_vec(),
        });
    }
    vendas.submit().await.unwrap();

    let (_, path, body) = backend
        .calls()
        .into_iter()
        .find(|(m, _, _)| *m == Method::POST)
        .unwrap();
    assert_eq!(path, "/api/venda");
    let RequestBody::Multipart { fields, files } = body else {
        panic!("esperava multipart");
    };
    let fields: HashMap<_, _> = fields.into_iter().collect();
    assert_eq!(fields["numero_lote"], "L-001");
    assert_eq!(fields["cpf_cnpj_comprador"], "12345678901");
    assert_eq!(fields["quantidade_vendida"], "10");
    assert!(!fields.contains_key("prazo_pagamento"));
    assert_eq!(files[0].0, "documento");
    assert_eq!(files[0].1.file_name, "nota.pdf");
}

#[tokio::test]
async fn delete_requires_confirmation_and_refetches() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();
    backend.clear_calls();

    assert!(!lotes.delete(1, |_| false).await.unwrap());
    assert!(backend.calls().is_empty());

    assert!(lotes.delete(1, |l| l.numero_lote == "L-001").await.unwrap());
    assert_eq!(backend.count(Method::DELETE, "/api/lote/1"), 1);
    assert_eq!(backend.count(Method::GET, "/api/lote"), 1);
}

#[tokio::test]
async fn business_error_in_a_200_becomes_an_error_toast() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();
    backend.fail_mutations(200, r#"{"success": false, "message": "Lote bloqueado"}"#);

    let err = lotes.delete(2, |_| true).await.unwrap_err();
    assert!(matches!(err, AppError::Business(_)));
    assert_eq!(lotes.items().len(), 2);
    assert_eq!(lotes.take_notifications()[0].message, "Lote bloqueado");
}

#[tokio::test]
async fn local_filter_and_clear() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();

    lotes.set_filter("002");
    let visible: Vec<_> = lotes.visible().iter().map(|l| l.id).collect();
    assert_eq!(visible, vec![2]);

    lotes.set_filter("");
    assert_eq!(lotes.visible().len(), 2);
}

#[tokio::test]
async fn loss_above_balance_is_blocked_and_valid_loss_decrements() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();
    backend.clear_calls();

    assert!(lotes.register_loss(1, 11).await.is_err());
    assert!(backend.calls().is_empty());

    lotes.register_loss(1, 3).await.unwrap();
    let (_, path, body) = backend
        .calls()
        .into_iter()
        .find(|(m, _, _)| *m == Method::PUT)
        .unwrap();
    assert_eq!(path, "/api/lote/1");
    let RequestBody::Json(payload) = body else {
        panic!("esperava JSON");
    };
    assert_eq!(payload["quantidade"], 7);
}

#[tokio::test]
async fn paid_toggle_uses_dedicated_route() {
    let gastos = json!([{
        "id": 5, "motivo_gasto": "Vacina", "qtd_cabecas": 10, "data_pagamento": "2024-05-05",
        "valor": 450.0, "lote": "L-001", "pago": false
    }]);
    let backend = Arc::new(
        FakeBackend::default()
            .with_list("/api/lote", lotes_json())
            .with_list("/api/gastovet", gastos),
    );
    let mut tela = screen::<GastoVet>(&backend);
    tela.mount().await.unwrap();
    backend.clear_calls();

    tela.set_paid(5, true).await.unwrap();
    assert_eq!(backend.count(Method::PUT, "/api/gastovet/5/pago"), 1);
    assert_eq!(backend.count(Method::PUT, "/api/gastovet/5"), 0);

    assert!(tela.set_paid(404, false).await.is_err());
    assert_eq!(backend.count(Method::PUT, "/api/gastovet/404/naopago"), 0);
}

#[tokio::test]
async fn dashboard_waits_for_all_three_lists() {
    let relatorio = json!([
        { "numero_lote": "L-001", "total_gastos": 100.0, "total_vendas": 0.0, "lucro": -100.0 },
        { "numero_lote": "L-002", "total_gastos": 200.0, "total_vendas": 15000.0, "lucro": 14800.0 }
    ]);
    let backend = Arc::new(
        FakeBackend::default()
            .with_list("/api/lote", lotes_json())
            .with_list("/api/relatorio", relatorio)
            .with_list("/api/venda", vendas_json()),
    );
    let mut painel = DashboardScreen::new(backend.clone());

    let summary = painel.load().await.unwrap().clone();
    assert_eq!(summary.total_cabecas, 40);
    assert_eq!(summary.lucro_total, rust_decimal::Decimal::from(14700));
    assert_eq!(summary.a_receber, rust_decimal::Decimal::from(15000));

    backend.fail_get("/api/relatorio", 500);
    assert!(painel.load().await.is_err());
    assert_eq!(painel.summary(), Some(&summary));
    assert!(painel.take_notifications()[0].is_error());
}

#[tokio::test]
async fn vaccination_above_lot_balance_is_blocked_before_any_request() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut vacinas = screen::<Vacina>(&backend);
    vacinas.mount().await.unwrap();
    backend.clear_calls();

    {
        let form = vacinas.form_mut();
        form.nome_vacina = "Aftosa".into();
        form.data_aplicacao = "2024-05-10".into();
        form.quantidade_cabecas = "11".into();
        form.numero_lote = "L-001".into();
    }
    let err = vacinas.submit().await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(backend.calls().is_empty());
    assert!(vacinas.take_notifications()[0]
        .message
        .contains("excede o disponível no lote L-001 (10)"));
}

#[tokio::test]
async fn cancel_edit_returns_to_create_without_requests() {
    let backend = Arc::new(FakeBackend::default().with_list("/api/lote", lotes_json()));
    let mut lotes = screen::<Lote>(&backend);
    lotes.mount().await.unwrap();
    backend.clear_calls();

    lotes.start_edit(1).unwrap();
    lotes.form_mut().numero_lote = "L-999".into();
    lotes.cancel_edit();

    assert_eq!(lotes.mode(), Mode::Create);
    assert!(lotes.editing().is_none());
    assert!(lotes.form().numero_lote.is_empty());
    assert!(backend.calls().is_empty());
    assert_eq!(lotes.items()[0].numero_lote, "L-001");
}

#[tokio::test]
async fn editing_a_sale_larger_than_the_remaining_lot_is_accepted() {
    // Lote 2 ficou com 3 cabeças depois da venda 7 (5 cabeças)
    let lotes = json!([{
        "id": 2, "numero_lote": "L-002", "quantidade": 3, "peso": 410.5,
        "valor_individual": 2800.0, "idade_media": 20, "data_compra": "2024-03-15"
    }]);
    let backend = Arc::new(
        FakeBackend::default()
            .with_list("/api/lote", lotes)
            .with_list("/api/venda", vendas_json()),
    );
    let mut vendas = screen::<Venda>(&backend);
    vendas.mount().await.unwrap();
    backend.clear_calls();

    vendas.start_edit(7).unwrap();
    vendas.form_mut().comprador = "Frigorífico Norte".into();
    vendas.submit().await.unwrap();

    assert_eq!(backend.count(Method::PUT, "/api/venda/7"), 1);
    assert_eq!(vendas.mode(), Mode::Create);
    let (_, _, body) = backend
        .calls()
        .into_iter()
        .find(|(m, _, _)| *m == Method::PUT)
        .unwrap();
    let RequestBody::Multipart { fields, .. } = body else {
        panic!("esperava multipart");
    };
    let fields: HashMap<_, _> = fields.into_iter().collect();
    assert_eq!(fields["comprador"], "Frigorífico Norte");
    assert_eq!(fields["quantidade_vendida"], "5");

    // Aumentar além do saldo + a própria venda continua bloqueado
    vendas.start_edit(7).unwrap();
    vendas.form_mut().quantidade_vendida = "9".into();
    backend.clear_calls();
    assert!(vendas.submit().await.is_err());
    assert!(backend.calls().is_empty());
    assert_eq!(vendas.mode(), Mode::Edit(7));
}

#[tokio::test]
async fn failed_lot_reload_keeps_the_fresh_main_list() {
    let backend = Arc::new(
        FakeBackend::default()
            .with_list("/api/lote", lotes_json())
            .with_list("/api/venda", vendas_json()),
    );
    let mut vendas = screen::<Venda>(&backend);
    vendas.mount().await.unwrap();
    assert_eq!(vendas.items().len(), 1);

    let mut updated = vendas_json();
    updated[0]["recebido"] = json!(true);
    backend.set_list("/api/venda", updated);
    backend.fail_get("/api/lote", 500);

    vendas.set_received(7, true).await.unwrap();

    assert!(vendas.items()[0].recebido);
    assert_eq!(vendas.references().lotes.len(), 2);
    let toasts = vendas.take_notifications();
    assert_eq!(toasts.len(), 2);
    assert_eq!(toasts[0].kind, NotificationKind::Success);
    assert!(toasts[1].is_error());
}
