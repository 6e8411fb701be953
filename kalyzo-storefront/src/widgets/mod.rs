//! State machines for the small page widgets.

pub mod carousel;
pub mod comments;
pub mod rating;
pub mod scroll_sync;

pub use carousel::{Carousel, ScrollDirection};
pub use comments::CommentPager;
pub use rating::StarRating;
pub use scroll_sync::{PanelMetrics, ScrollSync};
