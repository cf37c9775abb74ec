#[cfg(test)]
mod test_astronauts;
#[cfg(test)]
mod test_auth;
#[cfg(test)]
mod test_missions;
