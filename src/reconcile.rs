use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::git;
use crate::probe::RemoteSpec;

/// Target topology for one named remote: fetch from one platform, push to
/// both. `push_urls` keeps the fetch platform first so the displayed order
/// matches the role order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRemote {
    pub name: String,
    pub fetch_url: String,
    pub push_urls: Vec<String>,
}

impl DesiredRemote {
    /// Desired topology with `fetch_url` as the fetch platform and
    /// `mirror_url` as the additional push target.
    pub fn dual(name: &str, fetch_url: &str, mirror_url: &str) -> Self {
        Self {
            name: name.to_string(),
            fetch_url: fetch_url.to_string(),
            push_urls: vec![fetch_url.to_string(), mirror_url.to_string()],
        }
    }
}

/// One remote-mutation step. There is deliberately no remove variant:
/// reconciliation is strictly additive, a push URL configured by someone
/// else is never taken away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOp {
    CreateRemote { url: String },
    SetFetchUrl { url: String },
    AddPushUrl { url: String },
}

impl fmt::Display for PlanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOp::CreateRemote { url } => write!(f, "create remote with fetch URL {url}"),
            PlanOp::SetFetchUrl { url } => write!(f, "set fetch URL to {url}"),
            PlanOp::AddPushUrl { url } => write!(f, "add push URL {url}"),
        }
    }
}

/// Ordered remote mutations for one remote. Re-planning after a successful
/// apply yields an empty op list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub remote: String,
    pub ops: Vec<PlanOp>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Diff the current remote configuration against the desired topology.
///
/// - No remote of that name: create it seeded with the desired fetch URL,
///   then add every desired push URL.
/// - Fetch URL differs: set it. (Equal means no op, so an already-correct
///   remote produces an empty plan.)
/// - Each desired push URL missing from the explicit push set: add it.
///   Both platform URLs must end up as explicit push entries; once any
///   `pushurl` is set git stops pushing to the fetch URL, so adding only
///   the mirror would drop the fetch platform from the push set.
///
/// Membership is exact string equality over the structured push set, never
/// substring matching over listing text.
pub fn plan(current: Option<&RemoteSpec>, desired: &DesiredRemote) -> Plan {
    let mut ops = Vec::new();

    match current {
        None => {
            ops.push(PlanOp::CreateRemote {
                url: desired.fetch_url.clone(),
            });
            for url in &desired.push_urls {
                ops.push(PlanOp::AddPushUrl { url: url.clone() });
            }
        }
        Some(cur) => {
            if cur.fetch_url.as_deref() != Some(desired.fetch_url.as_str()) {
                ops.push(PlanOp::SetFetchUrl {
                    url: desired.fetch_url.clone(),
                });
            }
            for url in &desired.push_urls {
                if !cur.push_urls.iter().any(|p| p == url) {
                    ops.push(PlanOp::AddPushUrl { url: url.clone() });
                }
            }
        }
    }

    Plan {
        remote: desired.name.clone(),
        ops,
    }
}

/// Apply a plan step by step.
///
/// The first failing step aborts the rest; no rollback is attempted. The
/// working copy is left in whatever state the last successful step
/// produced, which is safe to re-run reconciliation against.
pub fn apply(dir: &Path, plan: &Plan) -> Result<()> {
    for op in &plan.ops {
        match op {
            PlanOp::CreateRemote { url } => git::remote_add(dir, &plan.remote, url)?,
            PlanOp::SetFetchUrl { url } => git::set_fetch_url(dir, &plan.remote, url)?,
            PlanOp::AddPushUrl { url } => git::add_push_url(dir, &plan.remote, url)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::probe;
    use std::path::Path;
    use std::process::Command;
    use tempfile::tempdir;

    const PRIMARY: &str = "https://host-a/u/r.git";
    const SECONDARY: &str = "https://host-b/u/r.git";

    fn spec(fetch: Option<&str>, push: &[&str]) -> RemoteSpec {
        RemoteSpec {
            name: "origin".to_string(),
            fetch_url: fetch.map(str::to_string),
            push_urls: push.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn missing_remote_is_created_then_both_push_urls_added() {
        let desired = DesiredRemote::dual("origin", PRIMARY, SECONDARY);
        let got = plan(None, &desired);
        assert_eq!(
            got.ops,
            vec![
                PlanOp::CreateRemote {
                    url: PRIMARY.to_string()
                },
                PlanOp::AddPushUrl {
                    url: PRIMARY.to_string()
                },
                PlanOp::AddPushUrl {
                    url: SECONDARY.to_string()
                },
            ]
        );
    }

    #[test]
    fn fresh_clone_keeps_fetch_and_adds_both_push_urls() {
        // A fresh clone has the right fetch URL and no explicit push URLs.
        let current = spec(Some(PRIMARY), &[]);
        let desired = DesiredRemote::dual("origin", PRIMARY, SECONDARY);
        let got = plan(Some(&current), &desired);
        assert_eq!(
            got.ops,
            vec![
                PlanOp::AddPushUrl {
                    url: PRIMARY.to_string()
                },
                PlanOp::AddPushUrl {
                    url: SECONDARY.to_string()
                },
            ]
        );
    }

    #[test]
    fn correct_topology_yields_empty_plan() {
        let current = spec(Some(PRIMARY), &[PRIMARY, SECONDARY]);
        let desired = DesiredRemote::dual("origin", PRIMARY, SECONDARY);
        assert!(plan(Some(&current), &desired).is_empty());
    }

    #[test]
    fn wrong_fetch_url_is_corrected() {
        let current = spec(Some(SECONDARY), &[PRIMARY, SECONDARY]);
        let desired = DesiredRemote::dual("origin", PRIMARY, SECONDARY);
        let got = plan(Some(&current), &desired);
        assert_eq!(
            got.ops,
            vec![PlanOp::SetFetchUrl {
                url: PRIMARY.to_string()
            }]
        );
    }

    #[test]
    fn only_missing_mirror_is_added() {
        let current = spec(Some(PRIMARY), &[PRIMARY]);
        let desired = DesiredRemote::dual("origin", PRIMARY, SECONDARY);
        let got = plan(Some(&current), &desired);
        assert_eq!(
            got.ops,
            vec![PlanOp::AddPushUrl {
                url: SECONDARY.to_string()
            }]
        );
    }

    #[test]
    fn third_party_push_url_survives() {
        let third = "https://host-c/u/r.git";
        let current = spec(Some(PRIMARY), &[third, PRIMARY, SECONDARY]);
        let desired = DesiredRemote::dual("origin", PRIMARY, SECONDARY);
        assert!(plan(Some(&current), &desired).is_empty());
    }

    #[test]
    fn swapping_roles_swaps_plan_structure() {
        let forward = plan(None, &DesiredRemote::dual("origin", PRIMARY, SECONDARY));
        let reverse = plan(None, &DesiredRemote::dual("origin", SECONDARY, PRIMARY));
        assert_eq!(
            forward.ops,
            vec![
                PlanOp::CreateRemote {
                    url: PRIMARY.to_string()
                },
                PlanOp::AddPushUrl {
                    url: PRIMARY.to_string()
                },
                PlanOp::AddPushUrl {
                    url: SECONDARY.to_string()
                },
            ]
        );
        assert_eq!(
            reverse.ops,
            vec![
                PlanOp::CreateRemote {
                    url: SECONDARY.to_string()
                },
                PlanOp::AddPushUrl {
                    url: SECONDARY.to_string()
                },
                PlanOp::AddPushUrl {
                    url: PRIMARY.to_string()
                },
            ]
        );
    }

    fn init_repo(dir: &Path) {
        let status = Command::new("git")
            .arg("init")
            .arg("--quiet")
            .arg(dir)
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[test]
    fn apply_reaches_target_topology_and_replan_is_empty() {
        let td = tempdir().unwrap();
        init_repo(td.path());

        let desired = DesiredRemote::dual("origin", PRIMARY, SECONDARY);
        let first = plan(None, &desired);
        apply(td.path(), &first).unwrap();

        let state = probe(td.path()).unwrap();
        let origin = state.remote("origin").unwrap();
        assert_eq!(origin.fetch_url.as_deref(), Some(PRIMARY));
        assert_eq!(origin.push_urls, vec![PRIMARY, SECONDARY]);

        let second = plan(Some(origin), &desired);
        assert!(second.is_empty());
    }
}
