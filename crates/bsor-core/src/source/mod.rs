mod bytes;
mod reader;
mod stream;

pub use bytes::ByteBuffer;
pub use reader::ReadBytes;
pub use stream::StreamSource;
