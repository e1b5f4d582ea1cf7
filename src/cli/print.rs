macro_rules! attempt_command_prefix {
    () => ({
        use std::io::Write;
        print!("Attempt command> ");
        std::io::stdout().flush().expect("Output flush failed");
    });
}

macro_rules! attempt_print {
    ($($arg:tt)*) => ({
        println!();
        println!($($arg)*);
        attempt_command_prefix!();
    })
}

/// Remaining or elapsed time as m:ss.
pub fn clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::clock;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(clock(0), "0:00");
        assert_eq!(clock(65), "1:05");
        assert_eq!(clock(1800), "30:00");
    }
}
