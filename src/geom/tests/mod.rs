mod test_profile_basic;
