pub mod animal;
pub mod crud;
pub mod dashboard;
pub mod gastovet;
pub mod lote;
pub mod notifications;
pub mod racao;
pub mod shell;
pub mod venda;

pub use crud::{CrudScreen, Mode};
pub use dashboard::DashboardScreen;
pub use notifications::{Notification, NotificationKind};
