// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Localization uses the Fluent system with `.ftl` bundles embedded in the
//! binary. The active locale is resolved from the CLI flag, then the config
//! file, then the OS locale, falling back to `en-US`.

pub mod fluent;
