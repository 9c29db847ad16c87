// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Once;

/// Installs a global test subscriber, filtered by the `BLOCK_RING_LOG` environment variable
pub fn init_tracing() {
    if cfg!(any(miri, fuzzing)) {
        return;
    }

    static TRACING: Once = Once::new();

    TRACING.call_once(|| {
        let default_level = if cfg!(debug_assertions) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };

        let env_filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(default_level.into())
            .with_env_var("BLOCK_RING_LOG")
            .from_env_lossy();

        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .compact()
            .with_test_writer()
            .try_init();
    });
}

/// Fills a block with a pattern derived from `seq`, so blocks can be told apart after a round trip
pub fn fill_block(seq: u32, block: &mut [u8]) {
    let bytes = seq.to_le_bytes();
    for (index, byte) in block.iter_mut().enumerate() {
        *byte = bytes[index % bytes.len()] ^ index as u8;
    }
}
