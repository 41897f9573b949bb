// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::KeyValueStore;
use crate::format::escape_html;
use crate::models::{DEFAULT_PROFILE_EMAIL, DEFAULT_PROFILE_NAME, Profile};
use crate::store::RecordStore;
use tracing::info;

pub const PROFILE_KEY: &str = "profile";

/// The stored profile, or the defaults when absent or corrupt. Blank fields
/// read as their defaults.
pub fn load_profile<S: KeyValueStore>(store: &RecordStore<S>) -> Profile {
    let stored: Profile = store.read_document(PROFILE_KEY);
    Profile {
        name: non_blank(&stored.name, DEFAULT_PROFILE_NAME),
        email: non_blank(&stored.email, DEFAULT_PROFILE_EMAIL),
    }
}

/// Persists `name`/`email`, replacing blank values with the defaults.
pub fn save_profile<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    name: &str,
    email: &str,
) -> Profile {
    let profile = Profile {
        name: non_blank(name, DEFAULT_PROFILE_NAME),
        email: non_blank(email, DEFAULT_PROFILE_EMAIL),
    };
    store.write_document(PROFILE_KEY, &profile);
    info!(name = %profile.name, "saved profile");
    profile
}

/// Forgets the stored profile; later loads return the defaults.
pub fn reset_profile<S: KeyValueStore>(store: &mut RecordStore<S>) -> Profile {
    store.remove_document(PROFILE_KEY);
    info!("reset profile");
    Profile::default()
}

fn non_blank(s: &str, fallback: &str) -> String {
    let t = s.trim();
    if t.is_empty() {
        fallback.to_string()
    } else {
        t.to_string()
    }
}

/// Avatar initials: first and last initial for multi-word names, otherwise
/// the first letter; `U` for a blank or default name.
pub fn initials(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() || name == DEFAULT_PROFILE_NAME {
        return "U".to_string();
    }
    let parts: Vec<&str> = name.split_whitespace().collect();
    let first_char = |s: &str| s.chars().next().map(|c| c.to_uppercase().to_string());
    if let [first, .., last] = parts.as_slice() {
        return format!(
            "{}{}",
            first_char(*first).unwrap_or_default(),
            first_char(*last).unwrap_or_default()
        );
    }
    first_char(name).unwrap_or_else(|| "U".to_string())
}

/// Header badge with avatar, name and email.
pub fn render_profile_badge(profile: &Profile) -> String {
    format!(
        r#"<div class="profile-badge"><span class="profile-avatar">{}</span><span class="profile-name">{}</span><span class="profile-email">{}</span></div>"#,
        escape_html(&initials(&profile.name)),
        escape_html(&profile.name),
        escape_html(&profile.email)
    )
}
