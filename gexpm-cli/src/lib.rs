// SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later

//! Command line interface for `gexpm`: a `heap` subcommand for the exact
//! Gauss-Southwell variant and a `queue` subcommand for the approximate
//! admission-queue variant.

pub mod cli;
pub mod io;
