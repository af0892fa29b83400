// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                             clone / list / status / sync
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          engine           |
//!              |  expand, reconcile, plan  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               pool         git     remote
//!            (flume +     GitRunner  Gitea/GitHub
//!             JoinSet)    git CLI    reqwest
//!
//!   +-----------------------------------------+
//!   |  config   v1/v2 JSON, foldout manifests |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod engine;
pub mod error;
pub mod foldout;
pub mod git;
pub mod logging;
pub mod pool;
pub mod remote;
