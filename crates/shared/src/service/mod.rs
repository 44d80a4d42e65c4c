mod publisher;

pub use self::publisher::EventPublisher;
