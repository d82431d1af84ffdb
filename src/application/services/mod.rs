//! 应用服务（用例实现）

pub mod compose;
pub mod consolidator;

pub use compose::{ComposeRewriter, ConsolidatedEnv, ServiceRewrite};
pub use consolidator::{
    CategoryStats, ConsolidationPlan, ConsolidationSummary, DiscoveryMode, EnvConsolidator,
};
