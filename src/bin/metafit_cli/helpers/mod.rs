// ABOUTME: Helper modules for the metafit CLI
// ABOUTME: Terminal output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

pub mod display;
