pub mod config;
pub mod embed;
pub mod inline_css;
pub mod utils;

pub use config::{EmbedOptions, EmbedOptionsBuilder};
pub use embed::{
    HttpImageEmbedder, ImageEmbedder, InlineStyle, LoadCompletion, LoadListener, LoadOutcome,
    NodeKind, embed_images, load_channel,
};
pub use embed::load_signal::{DecodeProbe, LoadEnvironment};
pub use inline_css::{
    CssResolver, CssUrlResolver, EmbedError, EmbedResult, FetchedResource, HttpFetcher,
    ResourceFetcher,
};
