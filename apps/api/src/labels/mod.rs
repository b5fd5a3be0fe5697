//! Mailing-label generation: Avery 3424 sheet geometry, the pure layout
//! engine, and the HTTP handler that ties them to the subscriber store and
//! the PDF renderer. Layout + rendering are CPU-bound and run inside
//! `tokio::task::spawn_blocking`.

pub mod geometry;
pub mod handlers;
pub mod layout;

pub use geometry::{SheetGeometry, AVERY_3424};
pub use layout::{layout, AddressRecord, LabelDocument};
