// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

cfg_if::cfg_if! {
    if #[cfg(all(loom, test))] {
        pub use ::loom::sync::atomic::{AtomicUsize, Ordering};
    } else {
        pub use ::core::sync::atomic::{AtomicUsize, Ordering};
    }
}
