// SPDX-License-Identifier: MPL-2.0
//! UI building blocks: design tokens, theming, and the toast system.

pub mod design_tokens;
pub mod notifications;
pub mod theming;
