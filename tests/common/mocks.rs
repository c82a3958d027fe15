//! Mock writer standing in for the sitemap output file.
use mockall::mock;

use std::io::{self, ErrorKind, Write};

mock! {
    pub File {}
    impl Write for File {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
}

impl MockFile {
    /// A file whose every write fails, as a full disk would.
    pub fn failing() -> Self {
        let mut file = MockFile::default();
        file.expect_write()
            .returning(|_| Err(io::Error::new(ErrorKind::StorageFull, "no space left on device")));
        file.expect_flush().returning(|| Ok(()));
        file
    }
}
