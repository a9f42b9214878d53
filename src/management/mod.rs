mod auth;
mod rules;

pub use auth::TokenManager;
pub use rules::RulesError;
pub use rules::RulesManager;
pub use rules::RulesSource;
