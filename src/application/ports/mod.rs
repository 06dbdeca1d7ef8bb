//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod generation_transport;
mod repositories;
mod secret_cipher;
mod token_verifier;

pub use generation_transport::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationTransportPort,
    Part, TransportError, TransportResponse,
};
pub use repositories::{
    HistoryRepositoryPort, RepositoryError, SystemConfigRecord, SystemConfigRepositoryPort,
};
pub use secret_cipher::{CipherError, SecretCipherPort};
pub use token_verifier::{AuthError, AuthenticatedUser, TokenVerifierPort};
