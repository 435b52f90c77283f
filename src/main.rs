//src/main.rs

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use agrobov::{
    AppConfig, AppState,
    common::masks::format_currency,
    screens::{DashboardScreen, shell},
    services::{export_service, token::role_of},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agrobov=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env().context("Falha ao carregar a configuração.")?;
    let app_state = AppState::new(config).context("Falha ao inicializar o estado da aplicação.")?;

    // Sessão: login com as credenciais do ambiente ou token já emitido
    if let (Some(email), Some(senha)) = (&app_state.config.email, &app_state.config.senha) {
        app_state
            .auth_service
            .login_user(email, senha)
            .await
            .context("Falha no login.")?;
    }

    let token = app_state.session.token();
    shell::guard(token.as_deref())
        .context("Sessão ausente ou expirada: defina AGROBOV_EMAIL/AGROBOV_SENHA ou AGROBOV_TOKEN.")?;

    let menu: Vec<&str> = shell::visible_menu(token.as_deref())
        .iter()
        .map(|item| item.label)
        .collect();
    let papel = token.as_deref().and_then(role_of).unwrap_or_default();
    tracing::info!("🧭 Menu liberado para '{}': {}", papel, menu.join(", "));

    // Painel
    let mut painel = DashboardScreen::new(app_state.backend.clone());
    let summary = painel
        .load()
        .await
        .context("Falha ao carregar o painel.")?
        .clone();

    tracing::info!("🐂 Lotes: {} | Cabeças: {}", summary.total_lotes, summary.total_cabecas);
    tracing::info!("💰 Lucro total: {}", format_currency(summary.lucro_total));
    tracing::info!(
        "🧾 Vendas: {} | A receber: {}",
        format_currency(summary.vendas_total),
        format_currency(summary.a_receber)
    );

    // Exportação opcional das listas já carregadas
    if let Some(dir) = &app_state.config.export_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Falha ao criar o diretório {}", dir.display()))?;

        export_service::export_to_file(painel.lotes(), &dir.join("lotes.csv"))?;
        if shell::can_access("/vendas", token.as_deref()).is_ok() {
            export_service::export_to_file(painel.vendas(), &dir.join("vendas.csv"))?;
        }
    }

    Ok(())
}
