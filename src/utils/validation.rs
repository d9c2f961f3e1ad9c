use regex::Regex;

// Usernames and uploaded file names become object keys, and the filesystem
// driver maps keys straight to paths. Both must stay single path components.

pub fn is_valid_username(name: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9._-]{0,127}$").unwrap();
    re.is_match(name)
}

pub fn is_valid_file_name(name: &str) -> bool {
    let re = Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9 ()._-]{0,254}$").unwrap();
    re.is_match(name)
}
