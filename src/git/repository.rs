use std::path::Path;

use git2::Repository;
use regex::Regex;

use crate::error::{ReleaseError, Result};
use crate::git::GitOps;

/// Real [GitOps] implementation over the `git2` crate.
///
/// Discovers the repository from the current working directory. Pushes
/// authenticate via SSH keys from `~/.ssh/` or the SSH agent.
pub struct Git2Repository {
    repo: Repository,
}

impl Git2Repository {
    /// Discover the repository in the current directory or its parents.
    pub fn new() -> Result<Self> {
        let repo = Repository::discover(".")?;
        Ok(Git2Repository { repo })
    }

    /// Open the repository at an explicit path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2Repository { repo })
    }
}

impl GitOps for Git2Repository {
    fn owner_and_repo(&self, remote: &str) -> Result<(String, String)> {
        let remote = self
            .repo
            .find_remote(remote)
            .map_err(|_| ReleaseError::remote(format!("Remote '{}' not found", remote)))?;
        let url = remote
            .url()
            .ok_or_else(|| ReleaseError::remote("Remote URL is not valid UTF-8"))?;

        let re = Regex::new(r"^git@[^:]+:([^/]+)/(.+)\.git$")
            .map_err(|e| ReleaseError::remote(e.to_string()))?;
        let captures = re.captures(url.trim()).ok_or_else(|| {
            ReleaseError::remote(format!(
                "Cannot parse owner/repo from remote URL '{}'",
                url
            ))
        })?;

        Ok((captures[1].to_string(), captures[2].to_string()))
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| git2::Error::from_str("HEAD is detached or not valid UTF-8").into())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(path)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|_| ReleaseError::remote(format!("Remote '{}' not found", remote)))?;

        let mut push_options = git2::PushOptions::new();

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            // SSH key authentication
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Surface per-reference rejections as push failures.
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                eprintln!(
                    "Warning: Could not update reference {}: {}",
                    refname, status
                );
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}",
                    refname
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}", branch = branch);
        remote
            .push(&[&refspec], Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseError::remote(format!("Network error during push: {}", e))
                } else {
                    ReleaseError::Git(e)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_repo(remote_url: &str) -> TempDir {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        fs::write(temp_dir.path().join("README.md"), "Initial content\n")
            .expect("Could not write initial file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        repo.commit(
            Some("HEAD"),
            &repo.signature().expect("Could not get sig"),
            &repo.signature().expect("Could not get sig"),
            "Initial commit",
            &tree,
            &[],
        )
        .expect("Could not create commit");

        repo.remote("origin", remote_url)
            .expect("Could not add remote");

        temp_dir
    }

    #[test]
    fn test_owner_and_repo_from_ssh_url() {
        let temp_dir = setup_test_repo("git@github.com:acme/widget.git");
        let git = Git2Repository::open(temp_dir.path()).unwrap();

        let (owner, repo) = git.owner_and_repo("origin").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widget");
    }

    #[test]
    fn test_owner_and_repo_rejects_https_url() {
        let temp_dir = setup_test_repo("https://github.com/acme/widget.git");
        let git = Git2Repository::open(temp_dir.path()).unwrap();

        let err = git.owner_and_repo("origin").unwrap_err();
        assert!(matches!(err, ReleaseError::Remote(_)));
    }

    #[test]
    fn test_owner_and_repo_unknown_remote() {
        let temp_dir = setup_test_repo("git@github.com:acme/widget.git");
        let git = Git2Repository::open(temp_dir.path()).unwrap();

        assert!(git.owner_and_repo("upstream").is_err());
    }

    #[test]
    fn test_current_branch() {
        let temp_dir = setup_test_repo("git@github.com:acme/widget.git");
        let git = Git2Repository::open(temp_dir.path()).unwrap();

        let branch = git.current_branch().unwrap();
        // Depends on the host's init.defaultBranch
        assert!(branch == "master" || branch == "main");
    }

    #[test]
    fn test_commit_file() {
        let temp_dir = setup_test_repo("git@github.com:acme/widget.git");
        fs::write(temp_dir.path().join("CHANGELOG.rst"), "Version 1.0.0\n").unwrap();

        let git = Git2Repository::open(temp_dir.path()).unwrap();
        git.commit_file(Path::new("CHANGELOG.rst"), "Release v1.0.0")
            .unwrap();

        let repo = Repository::open(temp_dir.path()).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message(), Some("Release v1.0.0"));
    }
}
