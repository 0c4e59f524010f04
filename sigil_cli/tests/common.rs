use assert_cmd::Command;

pub fn sigil_cmd() -> Command {
	let mut cmd = Command::cargo_bin("sigil").expect("the `sigil` binary should be built");
	cmd.env("NO_COLOR", "1");
	cmd
}
