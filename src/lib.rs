//! idemark-import: turns a link to an Idestrim idea into structured data
//! (title, description, image, tags) for pre-filling an Idemark submission.
//!
//! Two resolution paths are available: a direct query against the platform's
//! data API (endpoint and key discovered from its public client bundle), and
//! scraping the linked page's Open Graph / Twitter Card metadata and markup.
//! By default the first is tried and the second is the fallback.
//!
//! ```no_run
//! # async fn demo() -> Result<(), idemark_import::ImportError> {
//! use idemark_import::{ImportClient, ImportRequest, import_idea};
//!
//! let client = ImportClient::builder().build()?;
//! let idea = import_idea(
//!     &client,
//!     &ImportRequest::new("https://idestrim.site/idea/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
//! )
//! .await?;
//! println!("{}: {}", idea.title, idea.description);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod import;
pub mod link;
#[cfg(feature = "server")]
pub mod server;

pub use crate::core::{
    ConfigCache, ImportClient, ImportClientBuilder, ImportError, ImportRequest, ImportResponse,
    ImportResult, ImportStrategy, ParseStrategyError, PlatformConfig,
};
pub use crate::import::normalize::clean_html;
pub use crate::import::{ImportStage, import_idea};
