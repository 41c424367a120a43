// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Dialog labels are localized with Fluent. Locale resolution goes CLI flag,
//! then config, then OS locale, falling back to `en-US`.

pub mod fluent;
