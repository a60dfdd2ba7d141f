pub mod export;
pub mod ordering;
pub mod pagination;
pub mod submission_service;
pub mod view;

pub use export::{ExportFile, CSV_CONTENT_TYPE, EXPORT_HEADERS};
pub use ordering::{display_order, RecordOrder};
pub use pagination::{Page, Paginator, PAGE_SIZE};
pub use submission_service::{DynSubmissionService, SubmissionService, SubmissionServiceTrait};
pub use view::{RefreshTicket, ReportPage, ReportView, ViewPhase};
