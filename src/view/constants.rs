//! Layout dimension and formatting constants for TUI rendering.
//!
//! Centralized location for layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the query bar in lines (border + input).
pub const QUERY_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for status text and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the timeline heading (domain + record count).
pub const TIMELINE_HEADER_HEIGHT: u16 = 2;

/// Height of the paging controls below the timeline table.
pub const PAGER_HEIGHT: u16 = 1;

/// Width of the visit id column in the timeline table.
pub const VISIT_ID_COLUMN_WIDTH: u16 = 38;

/// Width of the crawl time column in the timeline table.
pub const CRAWL_TIME_COLUMN_WIDTH: u16 = 19;

/// Width of each crawl status column in the timeline table.
pub const STATUS_COLUMN_WIDTH: u16 = 10;

/// Most page-number buttons shown at once; the window follows the current page.
pub const MAX_PAGE_BUTTONS: u32 = 9;

/// Format of the crawl time column.
pub const TIMELINE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Format of the DNS crawl timestamp on the detail screen.
pub const DETAIL_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
