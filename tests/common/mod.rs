use assert_cmd::Command;

pub fn lingo_cmd() -> Command {
    Command::cargo_bin("lingo").unwrap()
}
