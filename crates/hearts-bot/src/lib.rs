pub mod policy;

pub use policy::{
    AgentKind, HeuristicAgent, HeuristicWeights, LowestLegalAgent, ParseAgentKindError,
    RandomAgent, build_agent,
};
