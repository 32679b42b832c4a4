pub mod git_commit;
