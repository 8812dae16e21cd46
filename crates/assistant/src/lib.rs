//! The AdmitBot response engine.
//!
//! A query flows through the [`Assistant`]:
//!
//! 1. **Log** the inbound query to the [`InteractionLog`]
//! 2. **Check** whether the user is still inside the greeting window
//! 3. **Classify** the query (off the executor, the tokenizer may be slow)
//! 4. **Compose** a reply from the per-intent [`ResponseHandlers`]
//! 5. **Record** the query in the user's session
//! 6. **Deliver** within the response bound, or send a placeholder and let
//!    the turn finish in the background
//!
//! Uploads go through the [`UploadAcknowledger`]. Nothing in this crate
//! returns an error to the caller: every boundary produces reply text.

pub mod handlers;
pub mod interaction_log;
pub mod orchestrator;
pub mod responses;
pub mod upload;

pub use handlers::{Clock, HandlerRequest, ResponseHandlers};
pub use interaction_log::{
    FileSink, InteractionEntry, InteractionKind, InteractionLog, InteractionSink, TracingSink,
};
pub use orchestrator::{Assistant, ChatReply, Delivery, Reply, ReplyStatus};
pub use upload::UploadAcknowledger;
