//! Theme preference that follows the OS until the user picks one

use tickbox::{DarkModeFlag, DocumentFlag, Environment, MediaQuery, MemoryStorage, ThemeStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Theme Example ===\n");

    let os = MediaQuery::new(true);
    let flag = DocumentFlag::new();
    let env = Environment::builder()
        .storage(MemoryStorage::new())
        .color_scheme(os.clone())
        .dark_mode_flag(flag.clone())
        .build();

    let theme = ThemeStore::new(&env);
    let _sub = theme.subscribe(|theme| println!("   [Theme] {theme}"));

    println!("1. init() with the OS preferring dark");
    theme.init();
    println!("   dark flag: {}", flag.is_dark());

    println!("\n2. OS switches to light");
    os.set_prefers_dark(false);

    println!("\n3. User toggles");
    theme.toggle();

    println!("\n4. OS switches again (ignored)");
    os.set_prefers_dark(true);
    println!("   current: {}, explicit: {}", theme.get(), theme.has_explicit_preference());
}
