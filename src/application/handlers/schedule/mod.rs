//! Schedule handlers - availability templates and session publication.

mod close_session;
mod create_template;
mod delete_template;
mod materialize_session;
mod publish_session;
mod session_queries;
mod update_capacity;
mod update_template;

pub use close_session::{CloseSessionCommand, CloseSessionHandler};
pub use create_template::{CreateTemplateCommand, CreateTemplateHandler};
pub use delete_template::{DeleteTemplateCommand, DeleteTemplateHandler};
pub use materialize_session::{MaterializeSessionCommand, MaterializeSessionHandler};
pub use publish_session::{PublishSessionCommand, PublishSessionHandler};
pub use session_queries::SessionQueryHandler;
pub use update_capacity::{UpdateCapacityCommand, UpdateCapacityHandler};
pub use update_template::{UpdateTemplateCommand, UpdateTemplateHandler};
