pub mod backfill_images;
pub mod convert_notes;
pub mod dispatch;
pub mod migrate;
pub mod purge;
pub mod status;
