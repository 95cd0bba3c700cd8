pub mod activity_log;
pub mod batch_writer;
pub mod config;
pub mod error;
pub mod link_extractor;
pub mod menu;
pub mod orchestrator;
pub mod request;
pub mod scroll_pager;
pub mod seen_store;
pub mod session;
pub mod utils;

pub use activity_log::ActivityLog;
pub use batch_writer::{BatchReceipt, BatchWriter, ExtractionBatch};
pub use config::HarvestConfig;
pub use error::{HarvestError, HarvestResult};
pub use link_extractor::{LinkEntry, extract_links, resolve_title};
pub use menu::{MenuChoice, parse_menu_choice};
pub use orchestrator::{
    ExtractionOrchestrator, ExtractionOutcome, NoOpProgress, ProgressReporter,
};
pub use request::{
    ExtractionRequest, Genre, SelectionParse, parse_genre_choice, parse_selection, random_keyword,
};
pub use scroll_pager::{ScrollPolicy, scroll_to_stable};
pub use seen_store::{SeenSet, SeenStore};
pub use session::{Anchor, ChromiumSession, MockSession, PageSession};
