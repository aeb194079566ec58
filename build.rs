//! Build script for tasksched
//!
//! Emits the `arm_architecture` cfg so we know whether the target core has
//! atomic read-modify-write instructions.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

/// Entry point to the build script
fn main() {
    arm_targets::process();
}

// End of File
