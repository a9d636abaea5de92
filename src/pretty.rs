macro_rules! print_cmd_error {
    ($tt:tt) => {
        eprintln!("\x1b[1;31m[ERROR!!!] {}\x1b[0m", $tt);
    };
    ($tt:tt, $($tts:tt)+) => {
        eprintln!("\x1b[1;31m[ERROR!!!] {}\x1b[0m", $tt);
        eprintln!("\x1b[1;31m[ERROR!!!]\x1b[0m Start details...");
        eprintln!("{}", core::format_args!($($tts)*));
        eprintln!("\x1b[1;31m[ERROR!!!]\x1b[0m End details.\n");
    }
}

macro_rules! print_cmd_info {
    ($tt:tt, $($tts:tt)*) => {
        eprintln!("\x1b[1;33m[INFO!!!] {}\x1b[0m", $tt);
        eprintln!("{}", core::format_args!($($tts)*));
    }
}

pub(crate) use print_cmd_error;
pub(crate) use print_cmd_info;
