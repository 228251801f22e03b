pub mod limits {
    pub mod documents {
        /// Maximum document size accepted by the engine (10MB)
        /// Prevents resource exhaustion on pathological inputs
        pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

        /// Threshold for considering a document "large" (1MB)
        /// Affects progress logging, not correctness
        pub const LARGE_DOCUMENT_THRESHOLD: usize = 1024 * 1024;

        /// Maximum number of documents discovered per batch run
        pub const MAX_DOCUMENTS_PER_BATCH: usize = 100_000;
    }

    pub mod tokenizer {
        /// Maximum number of word tokens allowed per document
        /// Prevents unbounded memory growth during tokenization
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum length of a single word token in characters
        /// Anything longer is noise, not natural language
        pub const MAX_WORD_LENGTH: usize = 255;
    }

    pub mod lexicon {
        /// Maximum number of entries accepted per word list
        pub const MAX_LIST_ENTRIES: usize = 200_000;

        /// Maximum word-list file size (5MB)
        pub const MAX_LIST_FILE_BYTES: u64 = 5 * 1024 * 1024;
    }

    pub mod logging {
        /// Total event buffer size for the global collector
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum events retained per document before truncation
        pub const MAX_LOG_EVENTS_PER_DOCUMENT: usize = 100;
    }
}
