use clap::Args;
use skillorbit::users::{AuthUser, IdentityProvider, ProviderCredential, UserId};
use skillorbit_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct SignUpArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password (at least 6 characters)
    #[arg(long, env = "SKILLORBIT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Name shown on the profile
    #[arg(long)]
    name: String,
}

pub(crate) async fn sign_up(context: &AppContext, args: SignUpArgs) -> Result<(), String> {
    let user = context
        .storefront
        .sign_up(&args.email, &args.password, &args.name)
        .await
        .into_result()
        .map_err(|error| format!("failed to sign up: {error}"))?;

    print_user(&user);

    Ok(())
}

#[derive(Debug, Args)]
pub(crate) struct SignInArgs {
    /// Account email
    #[arg(long, required_unless_present = "google_id_token")]
    email: Option<String>,

    /// Account password
    #[arg(long, env = "SKILLORBIT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Google ID token to sign in with instead of a password
    #[arg(long, conflicts_with = "email")]
    google_id_token: Option<String>,
}

pub(crate) async fn sign_in(context: &AppContext, args: SignInArgs) -> Result<(), String> {
    let outcome = match (args.google_id_token, args.email) {
        (Some(id_token), _) => {
            context
                .storefront
                .sign_in_with_provider(&ProviderCredential {
                    provider: IdentityProvider::Google,
                    id_token,
                })
                .await
        }
        (None, Some(email)) => {
            let password = args
                .password
                .ok_or_else(|| "password is required".to_string())?;

            context.storefront.sign_in(&email, &password).await
        }
        (None, None) => return Err("email or google-id-token is required".to_string()),
    };

    let user = outcome
        .into_result()
        .map_err(|error| format!("failed to sign in: {error}"))?;

    print_user(&user);
    println!("admin: {}", context.storefront.is_admin(&user.uid).await);

    Ok(())
}

#[derive(Debug, Args)]
pub(crate) struct ResetPasswordArgs {
    /// Account email
    #[arg(long)]
    email: String,
}

pub(crate) async fn reset_password(
    context: &AppContext,
    args: ResetPasswordArgs,
) -> Result<(), String> {
    context
        .storefront
        .send_password_reset(&args.email)
        .await
        .into_result()
        .map_err(|error| format!("failed to send password reset: {error}"))?;

    println!("password reset sent to {}", args.email);

    Ok(())
}

#[derive(Debug, Args)]
pub(crate) struct IsAdminArgs {
    /// User id to check
    #[arg(long)]
    uid: String,
}

pub(crate) async fn is_admin(context: &AppContext, args: IsAdminArgs) -> Result<(), String> {
    let admin = context.storefront.is_admin(&UserId::from(args.uid)).await;

    println!("{admin}");

    Ok(())
}

fn print_user(user: &AuthUser) {
    println!("uid: {}", user.uid);
    println!("email: {}", user.email.as_deref().unwrap_or("none"));
    println!(
        "display_name: {}",
        user.display_name.as_deref().unwrap_or("none")
    );
}
