//! Domain models shared across the entire TradeDeck core.

pub mod broker;
pub mod mode;
pub mod order;
pub mod portfolio;
pub mod position;
pub mod quote;

pub use broker::{BrokerBook, BrokerConnection, BrokerId, BrokerPatch, ConnectionStatus};
pub use mode::{AutopilotFlags, TradingMode};
pub use order::{Order, OrderKind, OrderStatus, Side};
pub use portfolio::{BudgetAllocation, BudgetBook, PortfolioTotals};
pub use position::Position;
pub use quote::Quote;
