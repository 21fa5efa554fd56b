mod bid_source;

pub use bid_source::BidSource;
