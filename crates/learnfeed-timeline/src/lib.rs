pub mod feed;
pub mod observer;
pub mod timeline;
pub mod composer;

pub use feed::FeedKind;
pub use observer::{FeedObserver, RecordingObserver};
pub use timeline::{Timeline, TimelineSnapshot};
pub use composer::{PostComposer, ComposeError};
