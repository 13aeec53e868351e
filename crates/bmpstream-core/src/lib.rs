/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by the bmpstream crates
//!
//! It currently contains
//!
//! - A storage capability trait modelling a block device that can open,
//!   seek, read and close named byte streams, with an in-memory and a
//!   file system provider.
//! - An endian aware reader on top of any storage provider.
//! - Stream options shared by the bitmap stream and its command line tool.
//! - A logging shim that forwards to the `log` crate when the `log` feature is on.
//!
//! This library is `#[no_std]` with `alloc` needed for the in-memory provider.
//!
//! # Features
//!  - `std`: Enables the [`FsStorage`](crate::storage::FsStorage) provider
//!     and `std::error::Error` implementations.
//!
//!  - `log`: Route internal diagnostics to the `log` crate.
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod log;
pub mod options;
pub mod storage;
