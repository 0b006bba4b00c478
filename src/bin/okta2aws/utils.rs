use anyhow::Result;

pub fn get_password() -> Result<String> {
    let password = rpassword::prompt_password("Password: ")?;

    Ok(password)
}
