// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod ledgers;
pub mod members;
pub mod settlement;
pub mod transactions;

/// Message printed when a request came back unauthorized and the stored
/// session was cleared.
pub const SESSION_EXPIRED: &str = "Session expired. Run 'ledgerclip login' to sign in again.";
