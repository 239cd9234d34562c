use std::io::{self, Write};

pub const BANNER: &str = r#"
   _____  _              _     ____                _
  |  ___|(_) _ __  ___ | |_  | __ )   ___    ___  | |_
  | |_   | || '__|/ __|| __| |  _ \  / _ \  / _ \ | __|
  |  _|  | || |   \__ \| |_  | |_) || (_) || (_) || |_
  |_|    |_||_|   |___/ \__| |____/  \___/  \___/  \__|

        ____  _   _  ___   ____         _
       / ___|| | | ||_ _| / ___|   ___ | |_  _   _  _ __
      | |  _ | | | | | |  \___ \  / _ \| __|| | | || '_ \
      | |_| || |_| | | |   ___) ||  __/| |_ | |_| || |_) |
       \____| \___/ |___| |____/  \___| \__| \__,_|| .__/
                                                   |_|
"#;

pub fn display(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{BANNER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_writes_banner_and_trailing_newline() {
        let mut out = Vec::new();
        display(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(BANNER));
        assert!(text.ends_with("\n\n"));
    }
}
