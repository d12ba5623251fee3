//! CSV export of the user roster.

use dojoscore_core::belts::{current_belt, next_belt};
use dojoscore_core::model::UserTable;

/// One row per user: progress and belt standing. The administrative
/// account is excluded, matching every other aggregate view.
pub fn roster(table: &UserTable, admin_username: &str) -> String {
    let mut out = String::from("username,score,belt,next_belt,progress,active_sessions\n");

    for (username, record) in table {
        if username == admin_username {
            continue;
        }
        let belt = current_belt(record.score);
        let next = next_belt(record.score);
        out.push_str(&format!(
            "{},{},{},{},{:.2},{}\n",
            escape(username),
            record.score,
            escape(belt.name),
            escape(next.label()),
            next.progress(),
            record.active_sessions
        ));
    }

    out
}

/// Quote a field when it contains CSV metacharacters.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojoscore_core::model::UserRecord;

    fn record(score: u64, sessions: u64) -> UserRecord {
        UserRecord {
            score,
            active_sessions: sessions,
            ..Default::default()
        }
    }

    #[test]
    fn roster_excludes_the_admin_and_resolves_belts() {
        let mut table = UserTable::new();
        table.insert("admin".into(), record(9000, 50));
        table.insert("ana".into(), record(160, 4));
        table.insert("bo".into(), record(1200, 9));

        let csv = roster(&table, "admin");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3); // header + 2 users
        assert!(lines[1].starts_with("ana,160,Orange Belt,Green Belt,"));
        assert!(lines[2].starts_with("bo,1200,Black Belt,Max level reached,1.00,"));
        assert!(!csv.contains("admin"));
    }

    #[test]
    fn awkward_usernames_are_quoted() {
        let mut table = UserTable::new();
        table.insert("doe, jane".into(), record(0, 0));

        let csv = roster(&table, "admin");
        assert!(csv.contains("\"doe, jane\""));
    }
}
